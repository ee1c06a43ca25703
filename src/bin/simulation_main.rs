// simulation_main.rs
use std::io::{stdout, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use traffic_intersection::SimulationEngine;

#[tokio::main]
async fn main() {
    env_logger::init();

    let engine = SimulationEngine::start_default();

    // The CLI exits on its own; Ctrl-C cuts it short.
    tokio::select! {
        _ = run_cli(&engine) => {}
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted.");
        }
    }

    engine.shutdown().await;
}

async fn run_cli(engine: &SimulationEngine) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("\nIntersection Admin CLI");
        println!("1. Add Vehicle");
        println!("2. Show Traffic Light Phase");
        println!("3. Show Queue Size");
        println!("4. Show Snapshot (JSON)");
        println!("5. Exit");
        prompt("Enter your choice: ");
        let Some(input) = read_line(&mut lines).await else {
            break;
        };
        match input.trim().parse::<u32>().unwrap_or(0) {
            1 => {
                prompt("Enter vehicle id: ");
                let Some(id) = read_line(&mut lines).await else {
                    break;
                };
                println!("{}", engine.add_vehicle(id.trim()));
            }
            2 => println!("Traffic light is {}", engine.current_phase()),
            3 => println!("Vehicles waiting: {}", engine.queue_size()),
            4 => match serde_json::to_string_pretty(&engine.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error serializing snapshot: {}", e),
            },
            5 => {
                println!("Exiting CLI.");
                break;
            }
            _ => println!("Invalid choice. Try again."),
        }
    }
}

// None on end of input or a read error.
async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            None
        }
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    if let Err(e) = stdout().flush() {
        log::warn!("Could not flush prompt: {}", e);
    }
}
