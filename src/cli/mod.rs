//! The `sai` command line interface
use crate::algorithms::{DelayAndSum, ImagingAlgorithm, ParallelDelayAndSum};
use crate::config::Config;
use crate::error::Result;
use crate::model::Image;
use crate::parser::DirectorySource;
use crate::reconstructor::ImageReconstructor;
use crate::region::TargetRegion;
use clap::Parser;
use std::path::{Path, PathBuf};

pub mod avro;
pub mod image;
pub mod info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Synthetic aperture imaging")]
pub struct Args {
    /// The action to run
    #[command(subcommand)]
    pub cmd: Action,
}

/// The actions of the command line interface
#[derive(clap::Subcommand, Debug)]
pub enum Action {
    /// Build an image and write it as a binary file or as text rows
    Image {
        /// Directory holding the measurement tables
        path: PathBuf,
        /// Binary image file to write instead of printing rows
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: ImagingOptions,
    },
    /// Build an image and write it to an Avro file
    Avro {
        /// Directory holding the measurement tables
        path: PathBuf,
        /// Avro file to write
        output: PathBuf,
        #[command(flatten)]
        options: ImagingOptions,
    },
    /// Summarize a data set
    Info {
        /// Directory holding the measurement tables
        path: PathBuf,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Options shared by the actions that build an image
#[derive(clap::Args, Debug, Clone)]
pub struct ImagingOptions {
    /// Vertical index of the slice to image
    #[arg(short, long, default_value_t = 0)]
    pub vertical: usize,
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Imaging algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmKind::DelayAndSum)]
    pub algorithm: AlgorithmKind,
    /// Grid cell size, overriding the configuration
    #[arg(long)]
    pub cell_size: Option<f32>,
}

/// The imaging algorithms available from the command line
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Sequential delay-and-sum
    DelayAndSum,
    /// Delay-and-sum with the grid split across threads
    Parallel,
}

impl ImagingOptions {
    /// The configuration file (or defaults) with command line overrides
    pub fn config(&self) -> Result<Config> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Load a JSON configuration, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_json_file(path),
        None => Ok(Config::default()),
    }
}

/// Build the image of one slice of the data set in `path`
pub fn reconstruct(path: &Path, options: &ImagingOptions) -> Result<(TargetRegion, Image)> {
    let config = options.config()?;
    let region = TargetRegion::from_config(&config)?;
    let source = DirectorySource::new(path, config.frequency_suffix_len);

    let sequential = DelayAndSum::from_config(&config);
    let parallel = ParallelDelayAndSum::new(sequential);
    let algorithm: &dyn ImagingAlgorithm = match options.algorithm {
        AlgorithmKind::DelayAndSum => &sequential,
        AlgorithmKind::Parallel => &parallel,
    };

    let mut reconstructor = ImageReconstructor::load(region, options.vertical, &source, &config)?;
    reconstructor.set_algorithm(algorithm);
    let image = reconstructor.build_image()?.clone();
    Ok((reconstructor.region().clone(), image))
}

/// Run the action named by the arguments
pub fn run(args: Args) -> Result<()> {
    match args.cmd {
        Action::Image {
            path,
            output,
            options,
        } => {
            image::image(&path, &options, output.as_deref())?;
        }
        Action::Avro {
            path,
            output,
            options,
        } => {
            avro::avro(&path, &output, &options)?;
        }
        Action::Info { path, config } => {
            info::info(&path, config.as_deref())?;
        }
    };
    Ok(())
}
