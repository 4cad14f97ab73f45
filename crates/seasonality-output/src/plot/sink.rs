//! Destinations for rendered figures.

use super::Figure;
use crate::error::PlotError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Anything a rendered figure can be presented to.
pub trait FigureSink {
    /// Present one figure. Figures arrive in rendering order.
    fn present(&mut self, figure: &Figure) -> Result<(), PlotError>;
}

/// Writes each figure to `<dir>/<NN>_<name>.svg`, numbering from 01.
#[derive(Debug)]
pub struct SvgDirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgDirectorySink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PlotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FigureSink for SvgDirectorySink {
    fn present(&mut self, figure: &Figure) -> Result<(), PlotError> {
        let path = self
            .dir
            .join(format!("{:02}_{}.svg", self.written.len() + 1, figure.name));
        fs::write(&path, &figure.svg)?;
        info!(figure = %figure.name, path = %path.display(), "Wrote figure");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps every presented figure in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Figures in presentation order.
    pub figures: Vec<Figure>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the presented figures, in order.
    pub fn names(&self) -> Vec<&str> {
        self.figures.iter().map(|f| f.name.as_str()).collect()
    }
}

impl FigureSink for MemorySink {
    fn present(&mut self, figure: &Figure) -> Result<(), PlotError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(name: &str) -> Figure {
        Figure {
            name: name.to_string(),
            svg: "<svg></svg>".to_string(),
        }
    }

    #[test]
    fn test_directory_sink_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = SvgDirectorySink::new(dir.path().join("figures")).unwrap();
        sink.present(&figure("time_series")).unwrap();
        sink.present(&figure("histograms")).unwrap();

        let names: Vec<_> = sink
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01_time_series.svg", "02_histograms.svg"]);
        assert_eq!(
            fs::read_to_string(&sink.written()[0]).unwrap(),
            "<svg></svg>"
        );
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.present(&figure("a")).unwrap();
        sink.present(&figure("b")).unwrap();
        assert_eq!(sink.names(), vec!["a", "b"]);
    }
}
