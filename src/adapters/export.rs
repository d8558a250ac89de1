use crate::adapters::document::{LatexRenderer, PdfCompiler};
use crate::adapters::tables;
use crate::core::{ConfigProvider, DocumentRenderer, Storage};
use crate::domain::ports::PlanReport;
use crate::utils::error::{PlannerError, Result};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "meal_plan.zip";
pub const DOCUMENT_STEM: &str = "meal_plan";

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub formats: Vec<String>,
    pub archive: bool,
    pub compile_pdf: bool,
}

impl ExportSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            formats: config.output_formats().to_vec(),
            archive: config.archive_enabled(),
            compile_pdf: config.compile_pdf(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            formats: vec!["csv".to_string()],
            archive: false,
            compile_pdf: false,
        }
    }
}

/// 各輸出管道的結果；單一管道失敗不影響其他已完成的輸出
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<String>,
    pub failures: Vec<PlannerError>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct PlanExporter<S: Storage> {
    storage: S,
    settings: ExportSettings,
    renderer: Box<dyn DocumentRenderer>,
    compiler: PdfCompiler,
}

impl<S: Storage> PlanExporter<S> {
    pub fn new(storage: S, settings: ExportSettings) -> Self {
        Self {
            storage,
            settings,
            renderer: Box::new(LatexRenderer),
            compiler: PdfCompiler::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn DocumentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_compiler(mut self, compiler: PdfCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// 輸出表格檔案（csv/tsv/json），需要時再打包成 zip
    pub fn export_tables(&self, report: &PlanReport<'_>) -> ExportReport {
        let mut result = ExportReport::default();
        let mut bundled: Vec<(String, Vec<u8>)> = Vec::new();

        for format in &self.settings.formats {
            let written = tables::render_table(format, report).and_then(|(name, data)| {
                let path = self
                    .storage
                    .write_file(&name, &data)
                    .map_err(|e| PlannerError::export(format, e))?;
                Ok((name, data, path))
            });

            match written {
                Ok((name, data, path)) => {
                    tracing::info!("📁 {} export saved to {}", format, path);
                    result.written.push(path);
                    bundled.push((name, data));
                }
                Err(e) => {
                    tracing::error!("❌ {} export failed: {}", format, e);
                    result.failures.push(e);
                }
            }
        }

        if self.settings.archive && !bundled.is_empty() {
            match self.write_archive(&bundled) {
                Ok(path) => result.written.push(path),
                Err(e) => {
                    tracing::error!("❌ archive export failed: {}", e);
                    result.failures.push(PlannerError::export("archive", e));
                }
            }
        }

        result
    }

    fn write_archive(&self, files: &[(String, Vec<u8>)]) -> Result<String> {
        tracing::debug!("Creating ZIP file with {} files", files.len());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in files {
                zip.start_file(name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(data)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_NAME, &zip_data)
    }

    /// 產生文件（必要時編譯 PDF）；回傳所有已寫出的路徑
    pub fn export_document(&self, report: &PlanReport<'_>) -> ExportReport {
        let mut result = ExportReport::default();
        let file_name = format!("{}.{}", DOCUMENT_STEM, self.renderer.extension());

        let written = self
            .renderer
            .render(report)
            .and_then(|data| self.storage.write_file(&file_name, &data))
            .map_err(|e| match e {
                err @ PlannerError::ExportError { .. } => err,
                other => PlannerError::export("document", other),
            });

        let source = match written {
            Ok(path) => {
                tracing::info!("📄 Document saved to {}", path);
                result.written.push(path.clone());
                path
            }
            Err(e) => {
                tracing::error!("❌ {}", e);
                result.failures.push(e);
                return result;
            }
        };

        if self.settings.compile_pdf {
            match self.compiler.compile(&source) {
                Ok(pdf) => result.written.push(pdf),
                Err(e) => {
                    tracing::error!("❌ {}", e);
                    result.failures.push(e);
                }
            }
        }

        result
    }
}
