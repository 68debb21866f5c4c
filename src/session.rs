//! One editing context: the pole/zero editor, the live signal and the filter
//! selection, driven by explicit commands from a host UI.
//!
//! A session never touches a rendering surface. Hosts issue commands
//! (`add_point`, `pointer_moved`, `undo`, ...) and pull read-only views, or
//! hand a [`PlotSink`] to [`Session::render`]. All commands run to completion
//! on the calling thread. A host with several editing contexts keeps one
//! `Session` per context.

use crate::config::EngineConfig;
use crate::filter::deriver::CoefficientDeriver;
use crate::filter::library::{CoefficientProvider, FilterLibrary, FilterSelection};
use crate::filter::poly;
use crate::filter::response::FrequencyResponse;
use crate::filter::{Coefficients, FilterError};
use crate::persist::{self, PersistError};
use crate::plane::editor::PoleZeroEditor;
use crate::plane::history::HistoryStack;
use crate::plane::{is_placeable, ComplexPoint, FilterState, RootKind};
use crate::signal::stream::{source_coefficients, StreamingFilter};
use crate::signal::{self, PointerEvent, PointerSignal, SignalError};
use crossbeam::channel::Receiver;
use log::{debug, warn};
use std::f64::consts::PI;
use std::io::{Read, Write};
use std::path::Path;
use uuid::Uuid;

/// The curves a session can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlotSeries {
    UnitCircle,
    Zeros,
    Poles,
    Magnitude,
    Phase,
    Unfiltered,
    Filtered,
}

/// Receives `(x, y)` series to draw. Empty series mean "clear".
pub trait PlotSink {
    fn plot(&mut self, series: PlotSeries, x: &[f64], y: &[f64]);
}

pub struct Session {
    id: Uuid,
    config: EngineConfig,
    editor: PoleZeroEditor,
    stream: StreamingFilter,
    pointer: PointerSignal,
    library: Box<dyn CoefficientProvider + Send>,
    selection: FilterSelection,
    // The plane as it was when `selection` was made. The selection only
    // applies while the plane still matches it.
    selected_plane: FilterState,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(EngineConfig::default())
    }
}

impl Session {
    /// Creates a session with an empty library.
    pub fn new(config: EngineConfig) -> Self {
        Session::with_library(config, FilterLibrary::new())
    }

    pub fn with_library<L>(config: EngineConfig, library: L) -> Self
    where
        L: CoefficientProvider + Send + 'static,
    {
        let history = match config.history_depth {
            Some(depth) => HistoryStack::with_depth(depth),
            None => HistoryStack::new(),
        };
        let id = Uuid::new_v4();
        debug!("session {} created", id);
        Session {
            id,
            editor: PoleZeroEditor::with_history(history),
            stream: StreamingFilter::new(config.max_length, config.window_length),
            pointer: PointerSignal::new(),
            library: Box::new(library),
            selection: FilterSelection::None,
            selected_plane: FilterState::default(),
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &FilterState {
        self.editor.state()
    }

    pub fn editor(&self) -> &PoleZeroEditor {
        &self.editor
    }

    /// The library filter driving the live signal. Undoing past a selection
    /// returns this to `None`, and redoing it brings the selection back.
    pub fn selection(&self) -> FilterSelection {
        if self.state() == &self.selected_plane {
            self.selection.clone()
        } else {
            FilterSelection::None
        }
    }

    /// Names offered by the filter library, `"None"` first.
    pub fn filter_names(&self) -> Vec<String> {
        let mut names = vec![FilterSelection::None.name().to_string()];
        names.extend(self.library.names());
        names
    }

    /// Receiver for the current plane state and every later change.
    pub fn subscribe(&mut self) -> Receiver<FilterState> {
        self.editor.subscribe()
    }

    /// Places a zero or pole. Positions outside the placement radius, or not
    /// finite, are ignored and `false` is returned.
    pub fn add_point(&mut self, kind: RootKind, position: ComplexPoint, add_conjugate: bool) -> bool {
        if !is_placeable(position, self.config.placement_radius) {
            debug!("session {}: rejected {} at {}", self.id, kind, position);
            return false;
        }
        self.manual_edit();
        self.editor.add_point(kind, position, add_conjugate);
        true
    }

    /// Removes the zero or pole closest to `target`. Returns `false` if the
    /// position is rejected or there is nothing to remove.
    pub fn remove_nearest(&mut self, target: ComplexPoint) -> bool {
        if !is_placeable(target, self.config.placement_radius) || self.state().is_empty() {
            return false;
        }
        self.manual_edit();
        self.editor.remove_nearest(target)
    }

    pub fn clear_zeros(&mut self) {
        self.manual_edit();
        self.editor.clear_zeros();
    }

    pub fn clear_poles(&mut self) {
        self.manual_edit();
        self.editor.clear_poles();
    }

    pub fn clear_all(&mut self) {
        self.manual_edit();
        self.editor.clear_all();
    }

    pub fn swap(&mut self) {
        self.manual_edit();
        self.editor.swap();
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Selects a library filter by name and shows its zeros and poles on the
    /// plane. `"None"` clears the plane and returns the live signal to the
    /// plane's own filter. Unknown names leave everything untouched and
    /// return `false`.
    pub fn select_filter(&mut self, name: &str) -> bool {
        let selection = FilterSelection::from_name(name);
        let state = match selection {
            FilterSelection::None => FilterState::default(),
            FilterSelection::Named(ref name) => match self.library.coefficients_for(name) {
                Some(coeffs) => FilterState::new(poly::roots(&coeffs.b), poly::roots(&coeffs.a)),
                None => {
                    warn!("session {}: no library filter named '{}'", self.id, name);
                    return false;
                }
            },
        };
        debug!("session {}: selected filter {}", self.id, selection);
        self.selection = selection;
        self.selected_plane = state.clone();
        self.editor.replace(state);
        true
    }

    /// Transfer function of the plane.
    pub fn coefficients(&self) -> Coefficients {
        CoefficientDeriver::coefficients(self.state())
    }

    /// Frequency response of the plane; empty when nothing is placed.
    pub fn frequency_response(&self) -> FrequencyResponse {
        CoefficientDeriver::response_of(self.state(), self.config.n_points)
    }

    /// Coefficients applied to the live signal.
    pub fn signal_coefficients(&self) -> Coefficients {
        source_coefficients(&self.selection(), &*self.library, self.state())
    }

    /// Feeds one pointer-move event into the live signal.
    pub fn pointer_moved(&mut self, event: PointerEvent) {
        let sample = self.pointer.sample(event);
        self.stream.append(sample);
    }

    /// Appends a sample directly.
    pub fn append_sample(&mut self, sample: f64) {
        self.stream.append(sample);
    }

    /// Appends every sample from CSV data to the live signal. Returns the
    /// number of samples read.
    pub fn upload_signal<R: Read>(&mut self, reader: R) -> Result<usize, SignalError> {
        let samples = signal::read_samples(reader)?;
        for sample in &samples {
            self.stream.append(*sample);
        }
        debug!("session {}: uploaded {} samples", self.id, samples.len());
        Ok(samples.len())
    }

    pub fn signal(&self) -> &StreamingFilter {
        &self.stream
    }

    /// The live signal filtered with [`signal_coefficients`](Session::signal_coefficients).
    pub fn filtered_signal(&self) -> Result<Vec<f64>, FilterError> {
        self.stream.filtered_output(&self.signal_coefficients())
    }

    /// Empties the live signal and starts a new pointer stroke.
    pub fn reset_signal(&mut self) {
        self.stream.reset();
        self.pointer.reset();
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), PersistError> {
        persist::save(self.state(), writer)
    }

    /// Replaces the plane with the one read from `reader`. On error the plane
    /// and history are unchanged.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), PersistError> {
        let state = persist::load(reader)?;
        self.manual_edit();
        self.editor.replace(state);
        Ok(())
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistError> {
        persist::save_file(self.state(), path).map_err(|e| {
            warn!("session {}: save failed: {}", self.id, e);
            e
        })
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PersistError> {
        let state = persist::load_file(path).map_err(|e| {
            warn!("session {}: load failed: {}", self.id, e);
            e
        })?;
        self.manual_edit();
        self.editor.replace(state);
        Ok(())
    }

    /// Pushes every curve to `sink`.
    ///
    /// Frequency axes are in units of pi/2. The signal curves cover the
    /// current display window, indexed by absolute sample position.
    pub fn render(&self, sink: &mut dyn PlotSink) -> Result<(), FilterError> {
        let n = self.config.unit_circle_points;
        let theta: Vec<f64> = (0..n)
            .map(|k| if n > 1 { 2.0 * PI * k as f64 / (n - 1) as f64 } else { 0.0 })
            .collect();
        let cx: Vec<f64> = theta.iter().map(|t| t.cos()).collect();
        let cy: Vec<f64> = theta.iter().map(|t| t.sin()).collect();
        sink.plot(PlotSeries::UnitCircle, &cx, &cy);

        let state = self.state();
        for (series, roots) in &[(PlotSeries::Zeros, &state.zeros), (PlotSeries::Poles, &state.poles)] {
            let x: Vec<f64> = roots.iter().map(|r| r.re).collect();
            let y: Vec<f64> = roots.iter().map(|r| r.im).collect();
            sink.plot(*series, &x, &y);
        }

        let resp = self.frequency_response();
        let axis: Vec<f64> = resp.w.iter().map(|w| w / (PI / 2.0)).collect();
        sink.plot(PlotSeries::Magnitude, &axis, &resp.magnitude());
        sink.plot(PlotSeries::Phase, &axis, &resp.phase());

        let input = self.stream.input();
        let output = self.filtered_signal()?;
        let window = self.stream.display_window();
        let visible_in = window.visible(&input);
        let start = window.start.min(input.len());
        let x: Vec<f64> = (start..start + visible_in.len()).map(|i| i as f64).collect();
        sink.plot(PlotSeries::Unfiltered, &x, visible_in);
        sink.plot(PlotSeries::Filtered, &x, window.visible(&output));
        Ok(())
    }

    // A hand edit means the plane no longer shows the library filter, even if
    // later undone back to it.
    fn manual_edit(&mut self) {
        if self.selection != FilterSelection::None {
            debug!("session {}: manual edit, dropping {}", self.id, self.selection);
            self.selection = FilterSelection::None;
        }
    }
}
