//! Verbose transcript of fixture steps, written to stderr.

use fixture_files::FileDigest;

pub(crate) struct Transcript {
    enabled: bool,
    started: bool,
}

impl Transcript {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: false,
        }
    }

    pub(crate) fn note(&mut self, message: impl AsRef<str>) {
        if !self.enabled {
            return;
        }
        self.start();
        eprintln!("- {}", message.as_ref());
    }

    /// Print a digest as two 64-character hex lines.
    pub(crate) fn digest(&mut self, label: &str, digest: &FileDigest) {
        if !self.enabled {
            return;
        }
        self.start();
        let hex = digest.to_hex();
        let (head, tail) = hex.split_at(hex.len() / 2);
        eprintln!("--- {label} sha512 ---");
        eprintln!("{head}");
        eprintln!("{tail}");
        eprintln!("--- end {label} ---");
    }

    fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        eprintln!("fixgen transcript:");
    }
}
