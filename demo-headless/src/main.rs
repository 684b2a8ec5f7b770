use clap::Parser;
use smoke_sim_core::{IntensityLevel, SmokeSimulation, Speed, VentSide, TICK_PERIOD};

/// Smoke stratification demo with configurable scenario parameters
#[derive(Parser, Debug)]
#[command(name = "smoke-sim-demo")]
#[command(about = "Two-zone smoke stratification demo", long_about = None)]
struct Args {
    /// Surface width in units
    #[arg(long, default_value_t = 400.0)]
    width: f32,

    /// Surface height in units
    #[arg(long, default_value_t = 400.0)]
    height: f32,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Fire intensity level (1-3)
    #[arg(short, long, default_value_t = 1)]
    intensity: u8,

    /// Speed multiplier (1, 2 or 4)
    #[arg(short, long, default_value_t = 1)]
    speed: u8,

    /// Fire position (defaults to the centre of the left zone)
    #[arg(long)]
    fire_x: Option<f32>,

    /// Open the door at this tick
    #[arg(long)]
    open_door_at: Option<u64>,

    /// Enable the left vent from the start
    #[arg(long)]
    vent_left: bool,

    /// Enable the right vent from the start
    #[arg(long)]
    vent_right: bool,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 100)]
    report_interval: u64,

    /// Pace ticks at the real wall-clock period instead of free-running
    #[arg(long)]
    realtime: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Smoke Stratification Demo ===\n");

    let mut sim = SmokeSimulation::new(args.width, args.height);
    println!(
        "Surface {:.0}x{:.0}, wall at x={:.0}",
        args.width,
        args.height,
        sim.obstruction().wall_x()
    );

    if let Some(x) = args.fire_x {
        sim.set_fire_origin(x);
    }
    if let Some(level) = IntensityLevel::from_level(args.intensity) {
        sim.set_intensity_level(level);
    } else {
        println!("Unknown intensity level {}, using 1", args.intensity);
    }
    if let Some(speed) = Speed::from_multiplier(args.speed) {
        sim.set_speed(speed);
    } else {
        println!("Unknown speed multiplier {}, using 1", args.speed);
    }
    sim.set_vent(VentSide::Left, args.vent_left);
    sim.set_vent(VentSide::Right, args.vent_right);

    println!(
        "Fire at x={:.0}, level {}, speed {}x, vents L={} R={}\n",
        sim.fire().position(),
        args.intensity,
        sim.speed().factor(),
        args.vent_left,
        args.vent_right
    );

    sim.start();

    for tick in 0..args.ticks {
        if args.open_door_at == Some(tick) {
            println!("--- Door opened at tick {} ---", tick);
            sim.set_door_open(true);
        }

        sim.tick();

        if args.realtime {
            std::thread::sleep(TICK_PERIOD);
        }

        if (tick + 1) % args.report_interval == 0 {
            let (left, right) = sim.zone_maxima();
            println!(
                "t={:>6.0}  particles={:>5}  depth={:>7.1}  layer L/R max={:>7.1}/{:>7.1}  fire={:>5.2}",
                sim.elapsed_time(),
                sim.particle_count(),
                sim.smoke_depth(),
                left,
                right,
                sim.fire().display_intensity()
            );
        }
    }

    println!("\n=== Final state ===");
    let (left, right) = sim.zone_maxima();
    println!("Elapsed time:     {:.0}", sim.elapsed_time());
    println!("Live particles:   {}", sim.particle_count());
    println!("Smoke depth:      {:.1}", sim.smoke_depth());
    println!("Layer max (L/R):  {:.1} / {:.1}", left, right);
    println!("Fire intensity:   {:.2}", sim.fire().intensity());
}
