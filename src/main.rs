use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use sobel_stream_rs::edge_pipeline::{
    EdgeStream, FrameLimit, FrameSink, GeometryPolicy, PipelineConfig, ProcessingMode,
    SinkConfig, TiffCompression, TiffSink, TiffSource,
};
use sobel_stream_rs::logger;

#[derive(Parser, Debug)]
#[command(name = "sobel-stream", about = "Sobel edge maps for every frame of a TIFF clip")]
struct Args {
    /// Multi-page TIFF file, or a directory of TIFF frames
    source: PathBuf,
    /// Output multi-page TIFF (defaults to <source>_edges.tiff)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Worker threads for tiled processing
    #[arg(long, default_value_t = 4)]
    workers: usize,
    /// Process frames on the main thread instead of in column tiles
    #[arg(long, default_value_t = false)]
    sequential: bool,
    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<NonZeroUsize>,
    #[arg(long, value_enum, default_value_t = Compression::None)]
    compression: Compression,
    #[arg(long, value_enum, default_value_t = OnMismatch::Abort)]
    on_geometry_mismatch: OnMismatch,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Compression {
    None,
    Lzw,
    DeflateFast,
    Deflate,
    DeflateBest,
}

impl From<Compression> for TiffCompression {
    fn from(c: Compression) -> Self {
        match c {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::DeflateFast => TiffCompression::DeflateFast,
            Compression::Deflate => TiffCompression::DeflateBalanced,
            Compression::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnMismatch {
    Abort,
    Skip,
}

fn default_output(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frames".to_string());
    source.with_file_name(format!("{stem}_edges.tiff"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init("info");

    info!("Starting sobel-stream...");

    let config = PipelineConfig::builder()
        .workers(args.workers)
        .mode(if args.sequential {
            ProcessingMode::Sequential
        } else {
            ProcessingMode::Tiled
        })
        .geometry_policy(match args.on_geometry_mismatch {
            OnMismatch::Abort => GeometryPolicy::Abort,
            OnMismatch::Skip => GeometryPolicy::Skip,
        })
        .build();
    config.validate().context("invalid pipeline configuration")?;

    let sink_config = SinkConfig::builder()
        .compression(args.compression.into())
        .build();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.source));

    let source = TiffSource::open(&args.source)
        .with_context(|| format!("cannot open video source {}", args.source.display()))?;
    let sink = TiffSink::create(&output, &sink_config)
        .with_context(|| format!("cannot create output {}", output.display()))?;
    let sink: Box<dyn FrameSink> = match args.max_frames {
        Some(limit) => Box::new(FrameLimit::new(sink, limit)),
        None => Box::new(sink),
    };

    info!(
        source = %args.source.display(),
        output = %output.display(),
        mode = ?config.mode,
        workers = config.workers,
        "Edge stream initialized"
    );

    let mut stream = EdgeStream::new(source, sink, config)?;
    match stream.run() {
        Ok(summary) => {
            info!(
                frames = summary.frames_processed,
                skipped = summary.frames_skipped,
                "Edge maps written to {}",
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Stream failed: {}", e);
            Err(e).context("edge stream failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_source_is_required() {
        assert!(Args::try_parse_from(["sobel-stream"]).is_err());
        assert!(Args::try_parse_from(["sobel-stream", "a.tiff", "b.tiff"]).is_err());

        let args = Args::try_parse_from(["sobel-stream", "clip.tiff"]).unwrap();
        assert_eq!(args.source, PathBuf::from("clip.tiff"));
        assert_eq!(args.workers, 4);
        assert!(!args.sequential);
        assert!(args.max_frames.is_none());
    }

    #[test]
    fn zero_max_frames_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["sobel-stream", "clip.tiff", "--max-frames", "0"]).is_err());
    }

    #[test]
    fn output_defaults_next_to_the_source() {
        assert_eq!(
            default_output(Path::new("/clips/run.tiff")),
            PathBuf::from("/clips/run_edges.tiff")
        );
        assert_eq!(
            default_output(Path::new("/clips/frames")),
            PathBuf::from("/clips/frames_edges.tiff")
        );
    }
}
