//! Pipeline - ties preference loading, label generation, sheet layout, and
//! PDF rendering together behind one session object.

use std::path::PathBuf;

use crate::config::{AppConfig, GenerateSettings, LayoutConfig};
use crate::error::{Error, StoreError};
use crate::label::{build_label, LabelArtifact};
use crate::layout::layout_labels;
use crate::render::PdfSink;
use crate::store::ConfigStore;
use crate::symbol::{QrEncoder, SymbolEncoder};

/// Build the full label sequence for one generate run.
///
/// The article text of label `i` is `"{lot}-{first_article_number + i}"`.
/// The returned sequence fully replaces any previous one; individual labels
/// are never edited or reordered after the fact.
pub fn generate_labels(
    settings: &GenerateSettings,
    layout: &LayoutConfig,
    encoder: &dyn SymbolEncoder,
) -> Result<Vec<LabelArtifact>, Error> {
    let mut labels = Vec::with_capacity(settings.count as usize);
    for i in 0..settings.count {
        let article = format!("{}-{}", settings.lot_code, settings.first_article_number + i);
        log::debug!("generating {article}");
        labels.push(build_label(
            &article,
            &settings.date_code,
            &settings.lot_code,
            layout,
            encoder,
        )?);
    }
    log::info!("generated {} labels", labels.len());
    Ok(labels)
}

/// Lay a label sequence out on A4 pages and return the PDF bytes.
pub fn render_sheet(
    labels: &[LabelArtifact],
    layout: &LayoutConfig,
    title: &str,
) -> Result<Vec<u8>, Error> {
    let mut sink = PdfSink::new(title);
    layout_labels(labels, layout, &mut sink)?;
    log::info!("rendered {} page(s)", sink.page_count());
    Ok(sink.finish())
}

/// Owner of the current configuration across one application run.
///
/// Preferences load once at startup, change only by whole-struct replacement
/// when the user accepts an edit, and every accepted change is written back
/// to the store.
pub struct Session {
    store: ConfigStore,
    config: AppConfig,
    encoder: Box<dyn SymbolEncoder>,
}

impl Session {
    /// Open a session against the preference file at `path`.
    ///
    /// A missing store falls back to built-in defaults; a corrupt store is an
    /// error the caller must surface, never silently repaired.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let store = ConfigStore::new(path);
        let config = match store.load() {
            Ok(config) => config,
            Err(StoreError::NotFound(path)) => {
                log::warn!(
                    "no stored preferences at {}, using defaults",
                    path.display()
                );
                AppConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            store,
            config,
            encoder: Box::new(QrEncoder),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace the configuration wholesale and persist it.
    ///
    /// Validation happens before anything is written; on failure the previous
    /// configuration stays in effect.
    pub fn update_config(&mut self, config: AppConfig) -> Result<(), Error> {
        config.layout.validate()?;
        self.store.save(&config)?;
        self.config = config;
        Ok(())
    }

    /// Run one generate action with the current settings.
    ///
    /// The accepted settings are persisted alongside the layout, so the next
    /// session starts from the same values.
    pub fn generate(&mut self) -> Result<Vec<LabelArtifact>, Error> {
        let labels = generate_labels(
            &self.config.generate,
            &self.config.layout,
            self.encoder.as_ref(),
        )?;
        self.store.save(&self.config)?;
        Ok(labels)
    }

    /// Print the given sequence to a PDF sheet.
    pub fn print_to_pdf(&self, labels: &[LabelArtifact], title: &str) -> Result<Vec<u8>, Error> {
        render_sheet(labels, &self.config.layout, title)
    }
}
