mod error;

use argh::FromArgs;
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;
use texstack::{ImageDesc, PlaneCoord};
use texstack_formats::file_io;

#[derive(FromArgs, Debug)]
/// Inspect and convert layered texture images (RIL, DDS).
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Info(InfoCmd),
    Convert(ConvertCmd),
    Mipgen(MipgenCmd),
}

/// Print the descriptor of an image file
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "info")]
struct InfoCmd {
    /// image file to inspect
    #[argh(positional)]
    input: PathBuf,

    /// also list every plane
    #[argh(switch, short = 'p')]
    planes: bool,
}

/// Convert an image to another container (chosen by output extension)
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "convert")]
struct ConvertCmd {
    /// input file path
    #[argh(option)]
    input: PathBuf,

    /// output file path; the extension selects the format
    #[argh(option)]
    output: PathBuf,
}

/// Generate a mipmap chain from the base plane of an image
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "mipgen")]
struct MipgenCmd {
    /// input file path
    #[argh(option)]
    input: PathBuf,

    /// output file path; the extension selects the format
    #[argh(option)]
    output: PathBuf,

    /// number of levels to generate (0 = full chain)
    #[argh(option, default = "0")]
    levels: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: TopLevel = argh::from_env();
    let result = match args.command {
        Commands::Info(cmd) => info(cmd),
        Commands::Convert(cmd) => convert(cmd),
        Commands::Mipgen(cmd) => mipgen(cmd),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn info(cmd: InfoCmd) -> Result<(), CliError> {
    let image = file_io::load_file(&cmd.input, None)
        .map_err(|e| CliError::format(&cmd.input, e))?;
    let desc = image.desc();
    if desc.empty() {
        return Err(CliError::EmptyImage(cmd.input));
    }

    print_summary(desc);
    if cmd.planes {
        for (i, plane) in desc.planes.iter().enumerate() {
            let coord = desc.coord(i);
            println!(
                "  plane {i:3}  a{} f{} l{}  {}x{}x{}  offset {:>10}  size {:>10}",
                coord.array,
                coord.face,
                coord.level,
                plane.extent.w,
                plane.extent.h,
                plane.extent.d,
                plane.offset,
                plane.size,
            );
        }
    }
    Ok(())
}

fn print_summary(desc: &ImageDesc) {
    let base = desc.plane(PlaneCoord::default());
    println!("format:    {}", base.format);
    println!(
        "extent:    {}x{}x{}",
        base.extent.w, base.extent.h, base.extent.d
    );
    println!("array:     {}", desc.array_length);
    println!("faces:     {}", desc.faces);
    println!("levels:    {}", desc.levels);
    println!("alignment: {}", desc.alignment);
    println!("size:      {} bytes", desc.size);
}

fn convert(cmd: ConvertCmd) -> Result<(), CliError> {
    let image = file_io::load_file(&cmd.input, None)
        .map_err(|e| CliError::format(&cmd.input, e))?;
    file_io::save_file(&cmd.output, image.view(), None)
        .map_err(|e| CliError::format(&cmd.output, e))
}

fn mipgen(cmd: MipgenCmd) -> Result<(), CliError> {
    let image = file_io::load_file(&cmd.input, None)
        .map_err(|e| CliError::format(&cmd.input, e))?;
    if image.empty() {
        return Err(CliError::EmptyImage(cmd.input));
    }
    let base = image.plane(PlaneCoord::default());
    let mipped = base
        .generate_mipmaps(image.data(), cmd.levels)
        .map_err(|e| CliError::format(&cmd.input, e.into()))?;
    file_io::save_file(&cmd.output, mipped.view(), None)
        .map_err(|e| CliError::format(&cmd.output, e))
}
