//! Toroidal Life CLI - Run simulations from JSON configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use toroidal_life::{
    compute::{Engine, SimulationStats},
    schema::SimulationConfig,
};

struct Args {
    config_path: Option<PathBuf>,
    steps: u64,
    watch: bool,
    example: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        steps: 100,
        watch: false,
        example: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--example" => args.example = true,
            "--watch" => args.watch = true,
            "--steps" => {
                let value = iter.next().ok_or("--steps needs a value")?;
                args.steps = value
                    .parse()
                    .map_err(|e| format!("Invalid step count {:?}: {}", value, e))?;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown flag {}", flag)),
            path => args.config_path = Some(PathBuf::from(path)),
        }
    }

    Ok(args)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [--steps N] [--watch] [--example]", program);
    eprintln!();
    eprintln!("Run Conway's Game of Life on a toroidal grid.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to simulation configuration file (default: 60x60 random)");
    eprintln!("  --steps N    Number of generations (default: 100)");
    eprintln!("  --watch      Draw every generation, paced at render.max_fps");
    eprintln!("  --example    Print the default configuration and exit");
}

fn main() {
    env_logger::init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "toroidal-life".to_string());

    let args = parse_args().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&program);
        std::process::exit(1);
    });

    if args.example {
        print_example_config();
        return;
    }

    let config = match &args.config_path {
        Some(path) => SimulationConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => SimulationConfig::default(),
    };

    let mut engine = Engine::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    if args.watch {
        if let Err(e) = watch(&mut engine, &config, args.steps, &mut io::stdout().lock()) {
            eprintln!("Error writing frame: {}", e);
            std::process::exit(1);
        }
    } else {
        run_headless(&mut engine, &config, args.steps);
    }
}

fn run_headless(engine: &mut Engine, config: &SimulationConfig, steps: u64) {
    println!("Toroidal Life Simulation");
    println!("========================");
    println!("Grid: {}x{}", config.rows, config.columns);
    if let Some((width, height)) = config.window_size() {
        println!("Window: {}x{} px", width, height);
    }
    println!("Steps: {}", steps);
    println!();

    let initial_stats = SimulationStats::from_engine(engine);
    println!("Initial state:");
    println!("  Population: {}", initial_stats.population);
    println!("  Density: {:.4}", initial_stats.density);
    println!();

    println!("Running simulation...");
    let start = Instant::now();

    for i in 0..steps {
        engine.step();

        // Print progress every 10%
        if (i + 1) % (steps / 10).max(1) == 0 {
            let stats = SimulationStats::from_engine(engine);
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Generation {}/{}: population={}, density={:.4}, {:.1} steps/s",
                i + 1,
                steps,
                stats.population,
                stats.density,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    let final_stats = SimulationStats::from_engine(engine);

    println!();
    println!("Final state:");
    println!("  Population: {}", final_stats.population);
    println!("  Density: {:.4}", final_stats.density);
    println!(
        "Time: {:.2}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        steps as f32 / elapsed.as_secs_f32()
    );
}

/// Draw generations 0 through `steps` to `out`, at most `render.max_fps` frames per second.
fn watch<W: Write>(
    engine: &mut Engine,
    config: &SimulationConfig,
    steps: u64,
    out: &mut W,
) -> io::Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / config.render.max_fps as f64);
    let render = &config.render;

    for frame in 0..=steps {
        let frame_start = Instant::now();

        // Clear screen and home the cursor
        write!(out, "\x1b[2J\x1b[H")?;
        writeln!(out, "{}", engine.render_text(render.alive_char, render.dead_char))?;
        let stats = SimulationStats::from_engine(engine);
        writeln!(
            out,
            "generation {}  population {}",
            stats.generation, stats.population
        )?;
        out.flush()?;

        if frame == steps {
            break;
        }
        engine.step();

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}

fn print_example_config() {
    let config = SimulationConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
