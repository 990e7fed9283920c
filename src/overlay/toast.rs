//! Toast notifications

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
    /// Lifetime left (ms)
    pub remaining_ms: f64,
    /// Full lifetime, for the progress bar
    pub duration_ms: f64,
}

impl Toast {
    /// Fraction of lifetime left (1.0 = fresh)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            0.0
        } else {
            (self.remaining_ms / self.duration_ms).clamp(0.0, 1.0) as f32
        }
    }
}

/// Visible toasts, oldest first
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, duration_ms: f64) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        let message = message.into();
        log::debug!("Toast [{:?}] {}", kind, message);
        self.toasts.push(Toast {
            id,
            kind,
            message,
            remaining_ms: duration_ms,
            duration_ms,
        });
        id
    }

    /// Click-to-close
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Age every toast and drop the expired ones
    pub fn advance(&mut self, elapsed_ms: f64) {
        for toast in &mut self.toasts {
            toast.remaining_ms -= elapsed_ms;
        }
        self.toasts.retain(|t| t.remaining_ms > 0.0);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let mut q = ToastQueue::new();
        q.push(ToastKind::Info, "short", 1000.0);
        q.push(ToastKind::Success, "long", 3000.0);
        q.advance(1000.0);
        assert_eq!(q.len(), 1);
        assert_eq!(q.toasts()[0].message, "long");
        assert!((q.toasts()[0].progress() - 2.0 / 3.0).abs() < 1e-6);
        q.advance(2500.0);
        assert!(q.is_empty());
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut q = ToastQueue::new();
        let id = q.push(ToastKind::Error, "boom", 4000.0);
        assert!(q.dismiss(id));
        assert!(!q.dismiss(id));
    }
}
