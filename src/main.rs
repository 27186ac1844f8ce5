use std::path::Path;
use std::time::Instant;
use GapCut::algorithms::{Grasp, Greedy, ReactiveGrasp, Solution};
use GapCut::gap::total_gap;
use GapCut::io::{read_instance, write_dot_to_file, write_partition_data_to_file};
use GapCut::Partition;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    /// A single deterministic greedy construction
    Greedy,
    /// Randomized greedy with restarts and a fixed alpha
    Grasp,
    /// Randomized greedy whose alpha adapts across restarts
    Reactive,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the .dat instance file
    instance_file: String,

    /// File where the solution forest is written in DOT format
    output_file: String,

    /// Construction heuristic
    #[arg(short, long, value_enum, default_value_t = Algorithm::Reactive)]
    algorithm: Algorithm,

    /// Number of partitions, overrides `param p` of the instance
    #[arg(short = 'p', long)]
    partitions: Option<usize>,

    /// GRASP restricted candidate list width
    #[arg(long, default_value_t = 0.3)]
    alpha: f64,

    /// Number of restarts (30 for grasp, 150 for reactive when omitted)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Restarts between re-weightings of the reactive alpha probabilities
    #[arg(long, default_value_t = 10)]
    update_every: usize,

    /// Seed for the random source
    #[arg(short, long)]
    seed: Option<u64>,

    /// Filename where the partition mapping can be stored
    #[arg(long)]
    partition_file: Option<String>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}


fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let instance = read_instance(Path::new(&args.instance_file))?;
    let graph = instance.graph;
    let num_of_partitions = args
        .partitions
        .or(instance.partitions)
        .ok_or("the instance has no `param p` and --partitions was not given")?;
    info!(vertices = graph.len(), edges = graph.edge_count(), num_of_partitions, "instance loaded");

    let mut partition = vec![0; graph.len()];
    let start = Instant::now();
    let solution: Solution = match args.algorithm {
        Algorithm::Greedy => Greedy { num_of_partitions }.partition(&mut partition, &graph)?,
        Algorithm::Grasp => Grasp {
            num_of_partitions,
            alpha: args.alpha,
            iterations: args.iterations.unwrap_or(30),
            seed: args.seed,
        }
        .partition(&mut partition, &graph)?,
        Algorithm::Reactive => ReactiveGrasp {
            num_of_partitions,
            iterations: args.iterations.unwrap_or(150),
            update_every: args.update_every,
            seed: args.seed,
            ..Default::default()
        }
        .partition(&mut partition, &graph)?,
    };
    let elapsed_time = start.elapsed();

    let weights: Vec<_> = graph.vertices().iter().map(|v| v.weight).collect();
    let verified_gap = total_gap(num_of_partitions, &partition, &weights);
    if verified_gap != solution.gap() {
        return Err(format!("reported gap {} differs from recomputed gap {}", solution.gap(), verified_gap).into());
    }

    write_dot_to_file(&solution.to_graph(&graph), Path::new(&args.output_file))?;
    if let Some(partition_file) = &args.partition_file {
        write_partition_data_to_file(&graph, &partition, Path::new(partition_file))?;
    }
    println!("Gap {:?}", solution.gap());
    println!("Restarts {:?} ({:?} stalled)", solution.completed() + solution.stalled, solution.stalled);
    println!("Execution time {:?}", elapsed_time);
    Ok(())
}
