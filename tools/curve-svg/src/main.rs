// Render curve-plane demos to SVG.
//
// Usage:
//   curve-svg render <demo> <width> <height> [--zoom <level>] [--frames <n>] [-o <output.svg>]
//   curve-svg list

use std::process;

use curve_svg::{demos, parse_frame_count, SvgSurface};
use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "list" => cmd_list(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("curve-svg - render demo curves to SVG");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <demo> <width> <height> [--zoom <level>] [--frames <n>] [-o <output.svg>]");
    eprintln!("      Advance the demo <n> frames (default 1) and write the last one.");
    eprintln!();
    eprintln!("  list");
    eprintln!("      List available demo names.");
}

fn cmd_list() {
    println!("Available demos:");
    for name in demos::available_demos() {
        println!("  {}", name);
    }
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, what: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {}: {}", what, value);
        process::exit(1);
    })
}

fn cmd_render(args: &[String]) {
    if args.len() < 3 {
        eprintln!("Usage: curve-svg render <demo> <width> <height> [options]");
        process::exit(1);
    }

    let demo = &args[0];
    let width: f64 = parse_or_exit(&args[1], "width");
    let height: f64 = parse_or_exit(&args[2], "height");

    let mut zoom: Option<f64> = None;
    let mut frames: u32 = 1;
    let mut output_path: Option<String> = None;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--zoom" if i + 1 < args.len() => {
                zoom = Some(parse_or_exit(&args[i + 1], "zoom level"));
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                frames = parse_frame_count(&args[i + 1]).unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
                i += 2;
            }
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                i += 1;
            }
        }
    }
    let output = output_path.unwrap_or_else(|| format!("{}_{}x{}.svg", demo, width, height));

    let mut plane = match demos::build_demo(demo, width, height) {
        Ok(Some(plane)) => plane,
        Ok(None) => {
            eprintln!("Unknown demo: '{}'. Use 'list' to see available demos.", demo);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Cannot build '{}': {}", demo, e);
            process::exit(1);
        }
    };
    if let Some(level) = zoom {
        if let Err(e) = plane.set_zoom(level) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    let mut svg = SvgSurface::new(width, height);
    for _ in 1..frames {
        plane.update(1.0);
    }
    let drawn = plane.frame(1.0, &mut svg);
    info!("drew {} curves into {} elements", drawn, svg.element_count());

    if let Err(e) = std::fs::write(&output, svg.finish()) {
        eprintln!("Failed to write {}: {}", output, e);
        process::exit(1);
    }
    println!("Saved: {}", output);
}
