//! Subscriber setup for the CLI.
//!
//! Events go to stderr unless a log directory is given, so rendered
//! reports on stdout stay machine-readable.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "disrupt.log";

const ROTATED_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size policy for the log file, applied once at startup
#[derive(Debug, Clone, Copy)]
struct Rotation {
    /// Files larger than this are cut back
    limit: u64,
    /// Newest bytes kept, minus the leading partial line
    retain: u64,
}

const DEFAULT_ROTATION: Rotation = Rotation {
    limit: 5 * 1024 * 1024,
    retain: 1024 * 1024,
};

impl Rotation {
    /// Cut `path` down in place. Returns whether anything was removed.
    fn apply(self, path: &Path) -> io::Result<bool> {
        let mut file = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };

        let len = file.metadata()?.len();
        if len <= self.limit {
            return Ok(false);
        }

        file.seek(SeekFrom::Start(len - self.retain.min(len)))?;
        let mut tail = Vec::new();
        file.read_to_end(&mut tail)?;
        let first_full_line = tail
            .iter()
            .position(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);

        file.set_len(0)?;
        file.rewind()?;
        file.write_all(ROTATED_MARKER)?;
        file.write_all(&tail[first_full_line..])?;
        Ok(true)
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level`, which otherwise applies to the CLI crate
/// while the core stays at `warn`. With `log_dir`, events are appended to
/// `{log_dir}/disrupt.log`, trimmed to its newest 1MB once past 5MB.
pub fn init_logging(log_dir: Option<&Path>, level: &str) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("disrupt={level},disrupt_core=warn")));
    let registry = tracing_subscriber::registry().with(filter);

    let Some(log_dir) = log_dir else {
        registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return Ok(());
    };

    std::fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    if let Err(e) = DEFAULT_ROTATION.apply(&log_path) {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    registry
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "file logging enabled");
    Ok(())
}
