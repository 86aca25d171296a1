use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "todoz", version)]
#[command(about = "Multi-user todo list server backed by plain JSON files", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to ./todoz.toml when present
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one snapshot file per user
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,
}
