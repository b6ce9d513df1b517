//! Batch CLI for cropscan with JSON configuration
//!
//! Processes every index rendering in a directory and writes one CSV
//! table per image

use cropscan::{export, interpret, Analyzer, AnalyzerConfig, ImageSource, IndexKind};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut index_code = "ndvi".to_string();
    let mut output_dir = PathBuf::from("informes");
    let mut input_arg = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
            }
            "--index" => {
                if i + 1 < args.len() {
                    index_code = args[i + 1].clone();
                    i += 1;
                } else {
                    eprintln!("Error: --index requires a value (ndvi, ndmi, savi)");
                    process::exit(1);
                }
            }
            "--out" => {
                if i + 1 < args.len() {
                    output_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                } else {
                    eprintln!("Error: --out requires a directory");
                    process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if input_arg.is_none() {
                    input_arg = Some(PathBuf::from(arg));
                } else {
                    eprintln!("Error: Multiple input directories provided");
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

    let input_dir = match input_arg {
        Some(dir) => dir,
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

    let config = match config_path {
        Some(path) => match AnalyzerConfig::from_json_file(&path) {
            Ok(config) => {
                eprintln!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };

    let image_files = match find_image_files(&input_dir) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_dir.display(), e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_dir.display());
        process::exit(1);
    }

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());
    eprintln!();

    let analyzer = Analyzer::with_config(config);
    let mut success_count = 0;
    let mut error_count = 0;

    for (i, image_path) in image_files.iter().enumerate() {
        let filename = image_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        eprint!("[{}/{}] Processing {}... ", i + 1, image_files.len(), filename);

        let source = ImageSource::Path(image_path.clone());
        match analyzer.analyze_index(&source, index).await {
            Ok(result) => {
                let base_name = image_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("informe");
                let csv_path = output_dir.join(format!("{}_{}.csv", base_name, index.code()));

                if let Err(e) = fs::write(&csv_path, export::to_csv(&result)) {
                    eprintln!("✗ could not write {}: {}", csv_path.display(), e);
                    error_count += 1;
                    continue;
                }

                eprintln!("✓");
                success_count += 1;

                if env::var("VERBOSE").is_ok() {
                    let diagnosis = interpret(&result, index);
                    eprintln!(
                        "  → {:?}, {} px, alerta {}: {}",
                        result.analysis_type,
                        result.total_pixels,
                        diagnosis.alert_level,
                        diagnosis.summary
                    );
                }
            }
            Err(error) => {
                eprintln!("✗ {}", error);
                error_count += 1;
            }
        }
    }

    eprintln!();
    eprintln!("Batch processing complete:");
    eprintln!("  Success: {}", success_count);
    eprintln!("  Errors: {}", error_count);
    eprintln!("  Reports saved to: {}", output_dir.display());

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <input_dir>", program_name);
    eprintln!();
    eprintln!("Batch classify satellite-index renderings and export CSV tables.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>  Analyzer configuration JSON");
    eprintln!("  --index <code>   Index to interpret: ndvi (default), ndmi, savi");
    eprintln!("  --out <dir>      Output directory for CSV reports (default: informes/)");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBOSE=1        Print a diagnosis line for each image");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} renderizados/", program_name);
    eprintln!("  VERBOSE=1 {} --index ndmi --out informes/ renderizados/", program_name);
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if dir.is_file() {
        files.push(dir.to_path_buf());
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if supported {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
