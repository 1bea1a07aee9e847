use clap::{CommandFactory, Parser, ValueEnum};
use mapready::backend::{Gravity, MagickBackend};
use mapready::config::ConvertConfig;
use mapready::label::Labeler;
use mapready::output;
use mapready::walker::Walker;
use std::path::{Path, PathBuf};

/// Corner of the image the label is anchored to.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn gravity(self) -> Gravity {
        match self {
            Corner::TopLeft => Gravity::NorthWest,
            Corner::TopRight => Gravity::NorthEast,
            Corner::BottomLeft => Gravity::SouthWest,
            Corner::BottomRight => Gravity::SouthEast,
        }
    }
}

#[derive(Parser)]
#[command(name = "mapready")]
#[command(version)]
#[command(about = "Convert photo collections for uploading to web mapping services")]
#[command(long_about = "\
Convert photo collections for uploading to web mapping services:
 - downscale to ~ 1920 x 1440 (map services reduce the resolution further)
 - compress (most services reject files over a few megabytes)
 - remove EXIF data (the services drop it anyway)
 - add a text label if needed (date, file name, etc.)

Requires ImageMagick (http://www.imagemagick.org).

By default photos are converted in place and the originals are moved into a
'backup' directory next to the source. With --destination the source tree is
mirrored into the given folder and the originals stay untouched.

Label templates are plain text plus TAGS in square brackets. A bracket group
renders only when every tag in it resolves; examples for HAPPY_SHOT.JPG taken
on August 20, 2020 at 16:33:53 (according to EXIF):

  any text                   -> any text
  [YYYY-MM-DD hh:mm:ss]      -> 2020-08-20 16:33:53
  [file_name]                -> HAPPY_SHOT
  [Month YYYY, ][file_name]  -> August 2020, HAPPY_SHOT
  [MONTH YYYY, ](C) Author   -> AUGUST 2020, (C) Author
  [month DD, YYYY. ]Any text -> august 20, 2020. Any text
  [[square brackets]]        -> [square brackets]

Examples:
  mapready image.jpg
  mapready image.jpg --destination \"Photos/To Upload\"
  mapready image.jpg --no-backup
  mapready \"Photos/Some file.jpg\" \"Photos/Some folder\" -d \"Photos/Temp\"
  mapready image.jpg --label \"[YYYY]\" --label-alignment bottom-left
  mapready place1.jpg place2.jpg --label \"[Month YYYY, ][file_name]\"
  mapready \"Photos/Central park\" --label \"Central park\"")]
struct Cli {
    /// Destination folder (if not given, files are converted in place)
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Don't keep originals when converting in place
    #[arg(short, long)]
    no_backup: bool,

    /// Text label template stamped onto each photo
    #[arg(short, long)]
    label: Option<String>,

    /// Corner of the image the label is placed in
    #[arg(short = 'a', long, value_enum, default_value_t = Corner::BottomRight)]
    label_alignment: Corner,

    /// Files and/or folders to process
    path: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.path.is_empty() {
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let config = ConvertConfig::load(Path::new("."))?;
    let labeler = Labeler::new(
        cli.label.as_deref(),
        cli.label_alignment.gravity(),
        &config,
    )?;
    let backend = MagickBackend::new(&config.convert_command, &config.identify_command);

    let walker = Walker::new(
        &backend,
        &config,
        labeler,
        cli.destination,
        !cli.no_backup,
    )?;
    let stats = walker.run(&cli.path)?;
    output::print_stats(&stats, &config);

    Ok(())
}
