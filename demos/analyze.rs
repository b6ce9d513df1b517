//! Command-line interface for cropscan
//!
//! Analyzes one index rendering and prints the category breakdown plus
//! the agronomic diagnosis

use cropscan::{
    analyze_and_interpret, color::rgb_to_hex, export, ClassificationResult, Diagnosis,
    ImageSource, IndexKind,
};
use std::{env, process};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let mut index_code = "ndvi".to_string();
    let mut json_output = false;
    let mut csv_output = false;
    let mut image_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--index" => {
                if i + 1 < args.len() {
                    index_code = args[i + 1].clone();
                    i += 1;
                } else {
                    eprintln!("Error: --index requires a value (ndvi, ndmi, savi)");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
            }
            "--csv" => {
                csv_output = true;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_arg.is_none() {
                    image_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image sources provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_arg = match image_arg {
        Some(arg) => arg,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let index = match IndexKind::from_code(&index_code) {
        Some(index) => index,
        None => {
            eprintln!(
                "Error: Unknown index '{}'. Supported: ndvi, ndmi, savi",
                index_code
            );
            process::exit(1);
        }
    };

    // data: URIs are decoded in place; anything else is a file path
    let source = ImageSource::from_uri(&image_arg);

    match analyze_and_interpret(&source, index).await {
        Ok((result, diagnosis)) => {
            if json_output {
                print_json(&result, &diagnosis);
            } else if csv_output {
                print!("{}", export::to_csv(&result));
            } else {
                print_summary(&result, &diagnosis);
            }
        }
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path_or_data_uri>", program_name);
    eprintln!();
    eprintln!("Classify a rendered satellite-index image and print its diagnosis.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --index <code>   Index to interpret: ndvi (default), ndmi, savi");
    eprintln!("  --json           Print the full result and diagnosis as JSON");
    eprintln!("  --csv            Print the category table as CSV");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} parcela.png", program_name);
    eprintln!("  {} --index ndmi --json humedad.png", program_name);
}

fn print_json(result: &ClassificationResult, diagnosis: &Diagnosis) {
    let combined = serde_json::json!({
        "classification": result,
        "diagnosis": diagnosis,
    });
    match serde_json::to_string_pretty(&combined) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }
}

fn print_summary(result: &ClassificationResult, diagnosis: &Diagnosis) {
    println!("Análisis: {}", diagnosis.index_info.name);
    println!(
        "Imagen: {}x{} ({} píxeles analizados, modo {:?})",
        result.metadata.image_width,
        result.metadata.image_height,
        result.total_pixels,
        result.analysis_type
    );
    if let Some(match_percentage) = result.metadata.match_percentage {
        println!("Coincidencia con paleta: {:.1}%", match_percentage);
    }
    println!();

    println!("Categorías:");
    for category in &result.categories {
        let color = category
            .rgb
            .map(rgb_to_hex)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<28} {:>8} {:>9} px  {:>6}%",
            category.name, color, category.count, category.percent
        );
    }

    println!();
    println!("Diagnóstico [{}]: {}", diagnosis.alert_level, diagnosis.summary);
    for alert in &diagnosis.alerts {
        println!("  Alerta: {}", alert);
    }
    for recommendation in &diagnosis.recommendations {
        println!("  Recomendación: {}", recommendation);
    }
}
