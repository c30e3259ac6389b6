//! Analytics events. Emitted by handlers after a successful action, never by the
//! generation core.

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    SignUp { email: String },
    Login { email: String },
    GenerationCreated {
        email: String,
        generation_id: String,
        platform: String,
    },
    GenerationDeleted { email: String, generation_id: String },
    AccountDeleted { email: String },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::SignUp { .. } => "sign_up",
            AnalyticsEvent::Login { .. } => "login",
            AnalyticsEvent::GenerationCreated { .. } => "generation_created",
            AnalyticsEvent::GenerationDeleted { .. } => "generation_deleted",
            AnalyticsEvent::AccountDeleted { .. } => "account_deleted",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            AnalyticsEvent::SignUp { email }
            | AnalyticsEvent::Login { email }
            | AnalyticsEvent::GenerationCreated { email, .. }
            | AnalyticsEvent::GenerationDeleted { email, .. }
            | AnalyticsEvent::AccountDeleted { email } => email,
        }
    }
}

/// Where analytics events go. Carried in `AppState` as `Arc<dyn EventSink>`.
pub trait EventSink: Send + Sync {
    fn record(&self, event: AnalyticsEvent);
}

/// Writes events to the `analytics` tracing target.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: AnalyticsEvent) {
        match &event {
            AnalyticsEvent::GenerationCreated {
                generation_id,
                platform,
                ..
            } => info!(
                target: "analytics",
                event = event.name(),
                user = event.email(),
                generation_id = %generation_id,
                platform = %platform
            ),
            AnalyticsEvent::GenerationDeleted { generation_id, .. } => info!(
                target: "analytics",
                event = event.name(),
                user = event.email(),
                generation_id = %generation_id
            ),
            _ => info!(target: "analytics", event = event.name(), user = event.email()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Sink that keeps every event for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl RecordingSink {
        pub(crate) fn names(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|e| e.name()).collect()
        }
    }

    impl EventSink for RecordingSink {
        fn record(&self, event: AnalyticsEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_names() {
        let event = AnalyticsEvent::GenerationCreated {
            email: "a@x.io".to_string(),
            generation_id: "1-blog-abc".to_string(),
            platform: "blog".to_string(),
        };
        assert_eq!(event.name(), "generation_created");
        assert_eq!(event.email(), "a@x.io");
    }

    /// In-memory writer for a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedOutput {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record_captured(events: Vec<AnalyticsEvent>) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingEventSink;
            for event in events {
                sink.record(event);
            }
        });
        output.text()
    }

    #[test]
    fn test_tracing_sink_writes_event_and_user_fields() {
        let output = record_captured(vec![
            AnalyticsEvent::SignUp {
                email: "a@x.io".to_string(),
            },
            AnalyticsEvent::GenerationCreated {
                email: "a@x.io".to_string(),
                generation_id: "1-blog-abc".to_string(),
                platform: "blog".to_string(),
            },
        ]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        assert!(lines[0].contains("analytics"));
        assert!(lines[0].contains("event=\"sign_up\""));
        assert!(lines[0].contains("user=\"a@x.io\""));

        assert!(lines[1].contains("event=\"generation_created\""));
        assert!(lines[1].contains("generation_id=1-blog-abc"));
        assert!(lines[1].contains("platform=blog"));
    }
}
