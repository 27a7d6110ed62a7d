use std::path::PathBuf;
use std::time::Duration;

use anstream::println;
use clap::Parser;
use clap::Subcommand;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use thousands::Separable;
use tracing_subscriber::EnvFilter;

use wayfinder::algorithms::astar::AStarSearch;
use wayfinder::algorithms::minimax::MinimaxSearch;
use wayfinder::algorithms::multi_goal::MultiGoalSearch;
use wayfinder::algorithms::uniform_cost::UniformCostSearch;
use wayfinder::algorithms::uninformed::Strategy;
use wayfinder::algorithms::uninformed::UninformedSearch;
use wayfinder::graph::WeightedGraph;
use wayfinder::heuristic::DEFAULT_EXPLORATION_CAP;
use wayfinder::heuristic::HeuristicTable;
use wayfinder::problems::ethiopia;
use wayfinder::space::Cost;
use wayfinder::space::Node;
use wayfinder::space::SearchResult;
use wayfinder::utility::UtilityTable;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Searches a road network.
#[derive(Parser, Debug)]
#[clap(long_version = wayfinder::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Edge list with `from, to, cost` lines. Defaults to the bundled
    /// Ethiopian road network.
    #[arg(short, long, global = true, env = "WAYFINDER_GRAPH")]
    pub graph: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Breadth-first or depth-first search, ignoring costs.
    Uninformed {
        start: String,
        goal: String,
        #[arg(short, long, default_value_t = Strategy::BreadthFirst)]
        strategy: Strategy,
    },
    /// Uniform-cost search.
    Ucs { start: String, goal: String },
    /// A* with a heuristic table, or one derived from the graph.
    Astar {
        start: String,
        goal: String,
        /// `city, estimate` lines. Without it estimates come from bounded
        /// uniform-cost searches.
        #[arg(long, env = "WAYFINDER_HEURISTICS")]
        heuristics: Option<PathBuf>,
        /// Goal the table estimates distances to. Defaults to `goal`.
        #[arg(long, requires = "heuristics")]
        heuristic_goal: Option<String>,
        /// Expansions allowed per self-computed estimate.
        #[arg(long, env = "WAYFINDER_EXPLORATION_CAP", default_value_t = DEFAULT_EXPLORATION_CAP)]
        exploration_cap: usize,
    },
    /// Greedily tours several goals.
    Tour {
        start: String,
        #[arg(required = true)]
        goals: Vec<String>,
    },
    /// Picks a destination against an adversary.
    Minimax {
        start: String,
        #[arg(short, long, env = "WAYFINDER_DEPTH", default_value_t = 4)]
        depth: usize,
        /// `city, score` lines. Defaults to the bundled coffee quality table.
        #[arg(long, env = "WAYFINDER_UTILITIES")]
        utilities: Option<PathBuf>,
        /// Score of cities missing from the utilities table.
        #[arg(long, default_value_t = ethiopia::DEFAULT_COFFEE_QUALITY)]
        default_utility: i64,
        /// Explore every branch.
        #[arg(long)]
        no_pruning: bool,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(p: Option<&PathBuf>) -> Result<WeightedGraph<String, u32>, Box<dyn std::error::Error>> {
    let g = match p {
        Some(p) => WeightedGraph::try_from(p.as_path())?,
        None => ethiopia::road_network()?,
    };
    println!(
        "Graph: {} nodes, {} directed edges",
        g.len().separate_with_commas(),
        g.edge_count().separate_with_commas()
    );
    Ok(g)
}

fn check_nodes(g: &WeightedGraph<String, u32>, nodes: &[&String]) {
    for n in nodes {
        if !g.contains(n) {
            log::warn!("{n:?} is not in the graph");
        }
    }
}

fn print_result<N, C>(name: &str, r: &SearchResult<N, C>, elapsed: Duration)
where
    N: Node,
    C: Cost,
{
    println!("{}", name.bold());
    match &r.path {
        Some(path) => println!("  {} {}", "Found".green(), path),
        None => println!("  {}", "Not found".red()),
    }
    println!(
        "  Explored {} nodes in {}",
        r.explored.len().separate_with_commas().yellow(),
        human_duration(&elapsed)
    );
    log::info!("Exploration order: {:?}", r.explored);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.color.write_global();
    init_logging();

    let graph = load_graph(args.graph.as_ref())?;
    let mut stopwatch = Stopwatch::new_started();

    match args.command {
        Command::Uninformed {
            start,
            goal,
            strategy,
        } => {
            check_nodes(&graph, &[&start, &goal]);
            let unweighted = graph.to_unweighted();
            let r = UninformedSearch::new(&unweighted).search(&start, &goal, strategy);
            stopwatch.stop();
            print_result(&format!("{strategy} {start} -> {goal}"), &r, stopwatch.elapsed());
        }
        Command::Ucs { start, goal } => {
            check_nodes(&graph, &[&start, &goal]);
            let r = UniformCostSearch::new(&graph).search(&start, &goal);
            stopwatch.stop();
            print_result(&format!("UCS {start} -> {goal}"), &r, stopwatch.elapsed());
        }
        Command::Astar {
            start,
            goal,
            heuristics,
            heuristic_goal,
            exploration_cap,
        } => {
            check_nodes(&graph, &[&start, &goal]);
            let (r, what) = match heuristics {
                Some(p) => {
                    let table_goal = heuristic_goal.unwrap_or_else(|| goal.clone());
                    if table_goal != goal {
                        log::warn!(
                            "Estimates point to {table_goal:?}, so searching for {goal:?} uses h=0"
                        );
                    }
                    let table = HeuristicTable::<String, u32>::load_for_goal(&table_goal, &p)?;
                    let r = AStarSearch::new(&graph, table).search(&start, &goal);
                    (r, format!("table from {p:?}"))
                }
                None => {
                    let mut astar = AStarSearch::with_exploration_cap(&graph, exploration_cap);
                    let r = astar.search(&start, &goal);
                    let what = format!(
                        "self-computed, {} estimates",
                        astar.heuristic().cache_len().separate_with_commas()
                    );
                    (r, what)
                }
            };
            stopwatch.stop();
            print_result(&format!("A* {start} -> {goal} ({what})"), &r, stopwatch.elapsed());
        }
        Command::Tour { start, goals } => {
            check_nodes(&graph, &[&start]);
            check_nodes(&graph, &goals.iter().collect::<Vec<_>>());
            let tour = MultiGoalSearch::new(&graph).search(&start, &goals);
            stopwatch.stop();

            println!("{}", format!("Tour from {start}").bold());
            let status = if tour.is_complete() {
                "Complete".green().to_string()
            } else {
                "Partial".red().to_string()
            };
            println!("  {status} {tour}");
            for (i, leg) in tour.legs.iter().enumerate() {
                println!("  Leg {}: {}", i + 1, leg);
            }
            println!("  Route {}", tour.path);
            println!("  Took {}", human_duration(&stopwatch.elapsed()));
        }
        Command::Minimax {
            start,
            depth,
            utilities,
            default_utility,
            no_pruning,
        } => {
            check_nodes(&graph, &[&start]);
            let utility = match utilities {
                Some(p) => UtilityTable::<String, i64>::load(&p, default_utility)?,
                None => UtilityTable::<String, i64>::parse(ethiopia::COFFEE_QUALITY, default_utility)?,
            };
            let unweighted = graph.to_unweighted();
            let r = MinimaxSearch::new(&unweighted, utility, depth)
                .with_pruning(!no_pruning)
                .search(&start);
            stopwatch.stop();

            println!("{}", format!("Minimax from {start} (depth {depth})").bold());
            println!("  Value {}", r.value.yellow());
            println!("  Principal path {}", format!("{:?}", r.principal_path).green());
            println!(
                "  Scored {} leaves in {}",
                r.leaves_evaluated.separate_with_commas(),
                human_duration(&stopwatch.elapsed())
            );
        }
    }

    Ok(())
}
