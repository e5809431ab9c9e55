use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,    // Cyan
    Success, // Green
    Warning, // Yellow
    Error,   // Red
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(id: u64, message: impl Into<String>, toast_type: ToastType, duration: Duration) -> Self {
        Self {
            id,
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Queue of status messages that dismiss themselves after a timeout.
pub struct ToastManager {
    queue: VecDeque<Toast>,
    next_id: u64,
    max_visible: usize,
    duration: Duration,
}

impl ToastManager {
    pub fn new(duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            next_id: 1,
            max_visible: 4,
            duration,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        // Errors linger twice as long
        let duration = match toast_type {
            ToastType::Error => self.duration * 2,
            _ => self.duration,
        };
        let toast = Toast::new(self.next_id, message, toast_type, duration);
        self.next_id = self.next_id.wrapping_add(1);
        self.queue.push_back(toast);
        while self.queue.len() > self.max_visible {
            self.queue.pop_front();
        }
    }

    /// Remove expired toasts
    pub fn update(&mut self) {
        self.queue.retain(|t| !t.is_expired());
    }

    pub fn visible_toasts(&self) -> Vec<&Toast> {
        self.queue.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
