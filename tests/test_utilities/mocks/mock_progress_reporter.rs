use iq_report::prelude::*;

/// Mock ProgressReporter for testing that captures events
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub events: std::sync::Arc<std::sync::Mutex<Vec<PipelineEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn skipped_reasons(&self) -> Vec<SkipReason> {
        self.get_events()
            .into_iter()
            .filter_map(|event| match event {
                PipelineEvent::ApplicationSkipped { reason, .. } => Some(reason),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report_event(&self, event: &PipelineEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
