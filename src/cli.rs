use crate::config::load_config;
use crate::graph::build_graph;
use crate::ir::{Direction, MeetingRecord};
use crate::layout::layout_graph;
use crate::layout_dump::{GraphDump, write_graph_dump};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "mgraph",
    version,
    about = "Meeting-relationship graph engine: build, lay out, dump as JSON"
)]
pub struct Args {
    /// Input file (JSON array of meeting records) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Flow direction: TB (top-to-bottom) or LR (left-to-right)
    #[arg(short = 'd', long = "direction")]
    pub direction: Option<String>,

    /// Config JSON5 file (box size, spacing, default direction)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Fixed "now" (RFC 3339) for the urgency window; defaults to wall clock
    #[arg(long = "now")]
    pub now: Option<DateTime<Utc>>,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let direction = resolve_direction(args.direction.as_deref(), config.direction.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let meetings: Vec<MeetingRecord> = serde_json::from_str(&input)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let graph = build_graph(&meetings, now)?;
    let positioned = layout_graph(&graph, direction, &config.layout);
    log::info!(
        "{} meetings, {} connections",
        graph.nodes.len(),
        graph.edges.len()
    );

    let dump = GraphDump::from_graph(&graph, &positioned, direction, &config.layout);
    write_graph_dump(&dump, args.output.as_deref())?;
    Ok(())
}

fn resolve_direction(flag: Option<&str>, config: Option<&str>) -> Result<Direction> {
    // The dashboard lays meeting graphs out left-to-right by default.
    let token = flag.or(config).unwrap_or("LR");
    Direction::from_token(token)
        .ok_or_else(|| anyhow::anyhow!("unknown direction `{token}` (expected TB or LR)"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
