//! DDL file writer

use crate::error::{GenError, Result};
use protoddl::{GeneratedTable, Generator, SchemaFile};
use std::fs;
use std::path::PathBuf;

/// Writes one `<table>.sql` file per generated table into an output directory
pub struct SqlWriter {
    outdir: PathBuf,
}

impl SqlWriter {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Write one table, replacing any existing file of the same name
    pub fn write_table(&self, table: &GeneratedTable) -> Result<PathBuf> {
        fs::create_dir_all(&self.outdir).map_err(|e| GenError::io(&self.outdir, e))?;

        let path = self.outdir.join(table.file_name());
        fs::write(&path, &table.ddl).map_err(|e| GenError::io(&path, e))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Translate and write every table message of a schema file.
    ///
    /// Each table is written as soon as it is translated. When a later message
    /// fails, files already written for earlier messages are left in place.
    pub fn write_schema(&self, generator: &Generator, schema: &SchemaFile) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        if !schema.generate {
            log::debug!("schema file `{}` is not marked for generation", schema.name);
            return Ok(written);
        }

        for message in &schema.messages {
            if let Some(table) = generator.translate_message(message)? {
                written.push(self.write_table(&table)?);
            }
        }

        Ok(written)
    }
}
