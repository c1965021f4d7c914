use clap::{Arg, Command as ClapCommand, ArgAction};
use log::{error, LevelFilter};
use std::path::Path;
use std::process;

use terrainkit::utils::logger::Logger;
use terrainkit::commands::{CommandFactory, TerrainkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("terrainkit")
        .version("0.1.0")
        .about("Cut a terrain sheet into the bitmaps and metadata of a terrain directory")
        .arg(
            Arg::new("input")
                .long("input")
                .help("Terrain sheet to convert [default: input.png]")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .help("Directory with templates and auxiliary assets [default: data]")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("Directory receiving the terrain files [default: output]")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("transparencycolor")
                .long("transparencycolor")
                .help("Colour of palette slot 0 in the output bitmaps [default: #FF00FF]")
                .value_name("COLOR")
                .required(false),
        )
        .arg(
            Arg::new("noalign")
                .long("noalign")
                .help("Do not align .img dimensions to multiples of 4")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file [default: terrainkit.toml if present]")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("list-regions")
                .long("list-regions")
                .help("Print the region catalog for the input and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = Logger::init_global_logger(Path::new("terrainkit.log"), level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = TerrainkitCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
