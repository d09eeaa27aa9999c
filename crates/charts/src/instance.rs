//! A live chart: dataset, configuration, layout and interaction state
//!
//! Each instance owns everything it needs. Nothing is shared between charts,
//! so two instances never observe each other's hover or pin.

use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::layout::{ChartLayout, ChartLayoutCalculator, LayoutJob, PendingLayout};
use crate::model::{Datum, Dataset};
use force_layout::{GenerationTicket, LayoutGenerations, LayoutSlot, StepOutcome};
use interaction::{InteractionMachine, InteractionState};
use perf::PerfTimer;

/// A chart bound to its data, reacting to pointer events
#[derive(Debug)]
pub struct ChartInstance {
    dataset: Dataset,
    config: ChartConfig,
    calculator: ChartLayoutCalculator,
    generations: LayoutGenerations,
    layout: LayoutSlot<ChartLayout>,
    pending: Option<(GenerationTicket, Box<PendingLayout>)>,
    machine: InteractionMachine<usize>,
}

impl ChartInstance {
    /// Create a chart and lay it out.
    ///
    /// Force-based charts run their simulation to completion here; use
    /// [`ChartInstance::progressive`] to step it per frame instead.
    pub fn new(dataset: Dataset, config: ChartConfig) -> ChartResult<Self> {
        let mut instance = Self::progressive(dataset, config)?;
        instance.settle()?;
        Ok(instance)
    }

    /// Create a chart whose simulation advances through [`ChartInstance::advance_frame`]
    pub fn progressive(dataset: Dataset, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let machine = InteractionMachine::new(config.interaction);
        let mut instance = Self {
            dataset,
            config,
            calculator: ChartLayoutCalculator::new(),
            generations: LayoutGenerations::new(),
            layout: LayoutSlot::new(),
            pending: None,
            machine,
        };
        instance.relayout()?;
        Ok(instance)
    }

    /// Register the hover observer
    pub fn on_hover(mut self, callback: impl FnMut(Option<&usize>) + 'static) -> Self {
        self.machine = self.machine.on_hover(callback);
        self
    }

    /// Register the pin observer
    pub fn on_pin(mut self, callback: impl FnMut(Option<&usize>) + 'static) -> Self {
        self.machine = self.machine.on_pin(callback);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Most recent finished layout
    pub fn layout(&self) -> Option<&ChartLayout> {
        self.layout.get()
    }

    /// Generation of the layout currently shown
    pub fn layout_generation(&self) -> u64 {
        self.layout.generation()
    }

    /// Whether a simulation is still in progress
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pending layout, for drawing intermediate positions
    pub fn pending(&self) -> Option<&PendingLayout> {
        self.pending.as_ref().map(|(_, p)| p.as_ref())
    }

    pub fn state(&self) -> &InteractionState<usize> {
        self.machine.state()
    }

    /// Record currently hovered or pinned
    pub fn focused(&self) -> Option<&Datum> {
        self.machine.state().focused().and_then(|i| self.dataset.get(*i))
    }

    /// Replace the data: interaction resets and any running simulation is superseded.
    ///
    /// When the new data cannot be laid out the chart keeps its previous
    /// data and finished layout.
    pub fn set_data(&mut self, dataset: Dataset) -> ChartResult<()> {
        let started = self.begin_layout(&dataset, &self.config);
        self.pending = None;
        let (ticket, job) = started?;
        self.dataset = dataset;
        self.machine.reset_for_data_change();
        self.install(ticket, job);
        Ok(())
    }

    /// Replace the configuration and lay out again
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        let started = self.begin_layout(&self.dataset, &config);
        self.pending = None;
        let (ticket, job) = started?;
        self.machine.set_config(config.interaction);
        self.config = config;
        self.install(ticket, job);
        Ok(())
    }

    fn relayout(&mut self) -> ChartResult<()> {
        let (ticket, job) = self.begin_layout(&self.dataset, &self.config)?;
        self.install(ticket, job);
        Ok(())
    }

    /// Start a new layout generation, superseding any running one
    fn begin_layout(
        &self,
        dataset: &Dataset,
        config: &ChartConfig,
    ) -> ChartResult<(GenerationTicket, LayoutJob)> {
        let ticket = self.generations.begin();
        let job = self.calculator.begin(dataset, config, Some(&ticket))?;
        Ok((ticket, job))
    }

    fn install(&mut self, ticket: GenerationTicket, job: LayoutJob) {
        match job {
            LayoutJob::Ready(layout) => {
                self.pending = None;
                self.layout.commit(&ticket, layout);
            }
            LayoutJob::Pending(pending) => {
                self.pending = Some((ticket, pending));
            }
        }
    }

    /// Run one frame of a pending simulation, committing the layout once it finishes
    pub fn advance_frame(&mut self) -> ChartResult<StepOutcome> {
        let Some((_, pending)) = self.pending.as_mut() else {
            return Ok(StepOutcome::Converged);
        };
        let outcome = pending.step_frame(&self.config.frame_budget);
        if outcome.is_finished() {
            self.commit_pending()?;
        }
        Ok(outcome)
    }

    /// Finish any pending simulation synchronously
    pub fn settle(&mut self) -> ChartResult<()> {
        if let Some((ticket, pending)) = self.pending.take() {
            let layout = (*pending).run()?;
            self.layout.commit(&ticket, layout);
        }
        Ok(())
    }

    fn commit_pending(&mut self) -> ChartResult<()> {
        if let Some((ticket, pending)) = self.pending.take() {
            let layout = (*pending).finish()?;
            self.layout.commit(&ticket, layout);
        }
        Ok(())
    }

    /// Record under the pointer in the current layout
    pub fn datum_at(&self, x: f64, y: f64) -> Option<usize> {
        self.layout.get()?.datum_at(x, y)
    }

    /// Pointer moved; returns whether the hovered record changed
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let timer = PerfTimer::pointer("pointer_move");
        let datum = self.datum_at(x, y);
        if let Some(violation) = self.config.perf_budget.check_pointer(timer.stop()) {
            violation.log();
        }
        match datum {
            Some(index) => self.machine.hover(index),
            None => self.machine.leave(),
        }
    }

    /// Pointer left the chart
    pub fn pointer_leave(&mut self) -> bool {
        self.machine.leave()
    }

    /// Click at a point; clicks on empty space change nothing
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        match self.datum_at(x, y) {
            Some(index) => self.machine.click(index),
            None => false,
        }
    }

    /// Legend entry hovered (`Some`) or left (`None`)
    pub fn legend_hover(&mut self, group: Option<String>) -> bool {
        self.machine.legend_hover(group)
    }

    /// Explicit reset such as a double click on the background
    pub fn reset(&mut self) -> bool {
        self.machine.reset()
    }

    /// Opacity for the mark of record `index`
    pub fn opacity(&self, index: usize) -> f64 {
        let group = self
            .dataset
            .get(index)
            .and_then(|d| d.color_group.as_deref());
        self.config.opacity.opacity(self.machine.state(), &index, group)
    }
}
