//! Text export of masks: one row per item with its coordinates and any number
//! of caller-supplied info columns.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use meshmask_common::{Error, Result};

use crate::mask::ExecutionMask;

/// Options for [`ExecutionMask::write_text`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Emit a first row naming the columns.
    pub write_header: bool,
    /// Column separator.
    pub delimiter: char,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            write_header: true,
            delimiter: '\t',
        }
    }
}

/// A named, computed column of the export.
///
/// The function receives the coordinates of the item and its element index.
pub struct InfoColumn<'a> {
    name: String,
    func: Box<dyn Fn(&[f64], usize) -> f64 + 'a>,
}

impl<'a> InfoColumn<'a> {
    pub fn new(name: impl Into<String>, func: impl Fn(&[f64], usize) -> f64 + 'a) -> Self {
        InfoColumn {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn eval(&self, coordinates: &[f64], item: usize) -> f64 {
        (self.func)(coordinates, item)
    }
}

impl std::fmt::Debug for InfoColumn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfoColumn").field("name", &self.name).finish()
    }
}

impl ExecutionMask {
    /// Writes the mask to a text file, one row per item in ascending order.
    ///
    /// Each row holds the coordinates of the item followed by the value of
    /// every info column, in the given order. Columns are tab separated.
    pub fn save_to_text_file(
        &self,
        path: impl AsRef<Path>,
        write_header: bool,
        columns: &[InfoColumn<'_>],
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        let options = ExportOptions {
            write_header,
            ..Default::default()
        };
        let mut writer = BufWriter::new(file);
        self.write_text(&mut writer, &options, columns)?;
        writer
            .flush()
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        log::debug!(
            "saved {} items of {} to {}",
            self.no_of_items_locally(),
            self.kind(),
            path.display()
        );
        Ok(())
    }

    /// Writes the mask as delimited text to `writer`.
    ///
    /// The optional header names the coordinate columns `coord_0 .. coord_{d-1}`
    /// followed by the info column names.
    pub fn write_text<W: Write>(
        &self,
        mut writer: W,
        options: &ExportOptions,
        columns: &[InfoColumn<'_>],
    ) -> Result<()> {
        let dim = self.domain().spatial_dimension();
        let delimiter = options.delimiter;
        let separator = delimiter.to_string();
        let io_err = |e: std::io::Error| Error::io("mask export", e);

        if options.write_header {
            let header = (0..dim)
                .map(|d| format!("coord_{d}"))
                .chain(columns.iter().map(|c| c.name().to_string()))
                .collect::<Vec<_>>()
                .join(separator.as_str());
            writeln!(writer, "{header}").map_err(io_err)?;
        }

        let mut coordinates = vec![0f64; dim];
        let mut buf = dtoa::Buffer::new();
        for item in self.items() {
            self.domain().coordinates(self.kind(), item, &mut coordinates);
            let values = coordinates
                .iter()
                .copied()
                .chain(columns.iter().map(|c| c.eval(&coordinates, item)));
            for (i, value) in values.enumerate() {
                if i > 0 {
                    write!(writer, "{delimiter}").map_err(io_err)?;
                }
                writer.write_all(buf.format(value).as_bytes()).map_err(io_err)?;
            }
            writeln!(writer).map_err(io_err)?;
        }
        Ok(())
    }
}
