use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::animation::{Clock, Transition};
use crate::core::{build_scales, rank};
use crate::data::{Dataset, LoadReport};
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::scene::ReconcileSummary;

use super::ChartEngine;

impl<R: Renderer, C: Clock> ChartEngine<R, C> {
    /// Installs a dataset and runs the pipeline for the current selection.
    ///
    /// Returns the reconciliation summary of that first pass.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Option<ReconcileSummary> {
        info!(
            rows = dataset.len(),
            selected_group = %self.selected_group,
            "dataset installed"
        );
        self.dataset = Some(dataset);
        self.run_pipeline()
    }

    /// Loads a dataset from a reader using the configured CSV options.
    ///
    /// A failed load is logged once and leaves any previous dataset in place.
    pub fn load_dataset_from_reader<Rd: Read>(&mut self, reader: Rd) -> ChartResult<LoadReport> {
        match Dataset::from_reader(reader, &self.config.csv) {
            Ok((dataset, report)) => {
                self.set_dataset(dataset);
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "dataset load failed; chart keeps its previous state");
                Err(err)
            }
        }
    }

    pub fn load_dataset_from_path(&mut self, path: impl AsRef<Path>) -> ChartResult<LoadReport> {
        let path = path.as_ref();
        match Dataset::from_path(path, &self.config.csv) {
            Ok((dataset, report)) => {
                self.set_dataset(dataset);
                Ok(report)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "dataset load failed; chart keeps its previous state"
                );
                Err(err)
            }
        }
    }

    /// Selects a group and re-runs rank, scales, bars and axes.
    ///
    /// Before a dataset is loaded the selection is only recorded and `None`
    /// is returned; the pipeline runs as soon as the dataset arrives. An
    /// unknown group is not an error: it ranks empty and every bar exits.
    pub fn select_group(&mut self, group: impl Into<String>) -> Option<ReconcileSummary> {
        self.selected_group = group.into();
        if self.dataset.is_none() {
            debug!(
                group = %self.selected_group,
                "selection recorded; waiting for dataset"
            );
            return None;
        }
        self.run_pipeline()
    }

    /// Prunes finished exits at the current clock time.
    ///
    /// Returns `true` while any bar or tick is still animating.
    pub fn advance(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        self.scene.advance(now_ms);
        self.axes.advance(now_ms);
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        let now_ms = self.clock.now_ms();
        self.scene.is_animating(now_ms) || self.axes.is_animating(now_ms)
    }

    fn run_pipeline(&mut self) -> Option<ReconcileSummary> {
        let dataset = self.dataset.as_ref()?;
        let ranked = rank(dataset.rows(), &self.selected_group, self.config.top_n);
        if ranked.is_empty() {
            debug!(group = %self.selected_group, "group has no rows; all bars exit");
        }

        let scales = match build_scales(
            &ranked,
            self.layout.body_width,
            self.layout.body_height,
            self.config.band_padding,
        ) {
            Ok(scales) => scales,
            Err(err) => {
                warn!(error = %err, "failed to build scales; keeping previous scene");
                return None;
            }
        };

        let now_ms = self.clock.now_ms();
        let bar_transition =
            Transition::new(now_ms, self.config.bar_transition_ms).with_easing(self.config.easing);
        let axis_transition =
            Transition::new(now_ms, self.config.axis_transition_ms).with_easing(self.config.easing);

        self.scene.advance(now_ms);
        self.axes.advance(now_ms);
        let summary = self.scene.reconcile(&ranked, &scales, bar_transition);
        self.axes.render_axes(&scales, axis_transition);

        self.ranked = ranked;
        self.scales = Some(scales);
        Some(summary)
    }
}
