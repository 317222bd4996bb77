//! AquaGraph 命令行工具
//!
//! 加载供水网络 CSV 并执行最大流与路径查询

use anyhow::{bail, Context, Result};
use aquagraph::algorithm::{EdmondsKarp, PathFinder};
use aquagraph::cli::{format_capacity, PrintMode, Printer};
use aquagraph::graph::{Graph, VertexId};
use aquagraph::import::NetworkLoader;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aquagraph")]
#[command(about = "AquaGraph 供水网络最大流分析工具")]
struct Args {
    /// 节点文件 (code,role)
    #[arg(short, long)]
    nodes: PathBuf,

    /// 管道文件 (origin,destination,capacity[,bidirectional])
    #[arg(short, long)]
    pipes: PathBuf,

    /// 遇到无效记录时立即失败
    #[arg(long)]
    strict: bool,

    /// 垂直显示结果
    #[arg(short = 'G', long)]
    vertical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示网络统计信息
    Summary,
    /// 计算两点之间的最大流
    MaxFlow { source: String, sink: String },
    /// 计算最大流并列出最小割边
    MinCut { source: String, sink: String },
    /// 所有水库同时供水时城市的最大流量
    CityFlow { city: String },
    /// 找出向目标输水最多的单一水源
    BestSource { target: String },
    /// 枚举两点之间的所有简单路径及其瓶颈
    Paths {
        source: String,
        sink: String,
        /// 路径最大边数
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn lookup(graph: &Graph, code: &str) -> Result<VertexId> {
    match graph.find_vertex(code) {
        Some(id) => Ok(id),
        None => bail!("顶点不存在: {}", code),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut graph = Graph::new();
    NetworkLoader::new()
        .strict(args.strict)
        .load(&mut graph, &args.nodes, &args.pipes)
        .with_context(|| format!("加载网络失败: {:?}, {:?}", args.nodes, args.pipes))?;

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let printer = Printer::new(mode);
    let start = Instant::now();

    match args.command {
        Command::Summary => {
            print!("{}", printer.print_stats(&graph));
        }

        Command::MaxFlow { source, sink } => {
            let value = EdmondsKarp::new(&mut graph).max_flow_between(&source, &sink);
            println!("最大流 {} -> {}: {}", source, sink, format_capacity(value));
        }

        Command::MinCut { source, sink } => {
            let s = lookup(&graph, &source)?;
            let t = lookup(&graph, &sink)?;
            let mut ek = EdmondsKarp::new(&mut graph);
            let result = ek.max_flow(s, t);
            let cut = ek.min_cut_edges(&result);
            println!(
                "最大流 {} -> {}: {} ({} 次增广)",
                source,
                sink,
                format_capacity(result.value),
                result.augmentations
            );
            print!(
                "{}",
                printer.print_edges(ek.graph(), &cut, start.elapsed().as_millis() as u64)
            );
        }

        Command::CityFlow { city } => {
            let target = lookup(&graph, &city)?;
            let value = EdmondsKarp::new(&mut graph).max_flow_to_city(target)?;
            println!("城市 {} 可获得的最大流量: {}", city, format_capacity(value));
        }

        Command::BestSource { target } => {
            let t = lookup(&graph, &target)?;
            let best = EdmondsKarp::new(&mut graph).best_source(t);
            match best {
                Some(best) => println!(
                    "向 {} 输水最多的水源: {} ({})",
                    target,
                    graph.code(best.source).unwrap_or("?"),
                    format_capacity(best.value)
                ),
                None => println!("没有可用的水源"),
            }
        }

        Command::Paths {
            source,
            sink,
            max_depth,
        } => {
            let s = lookup(&graph, &source)?;
            let t = lookup(&graph, &sink)?;
            let finder = PathFinder::new(&graph);
            let paths = match max_depth {
                Some(depth) => finder.all_paths_within(s, t, depth),
                None => finder.all_paths(s, t),
            };
            print!(
                "{}",
                printer.print_paths(&paths, start.elapsed().as_millis() as u64)
            );
        }
    }

    Ok(())
}
