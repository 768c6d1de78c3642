//! Simulated network latency
//!
//! Every endpoint sleeps for a fixed base delay before answering; the
//! profile scales all of them at once.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Logout,
    ListTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Endpoint {
    pub fn base_delay(self) -> Duration {
        let millis = match self {
            Self::Login => 800,
            Self::Logout => 300,
            Self::ListTasks => 500,
            Self::CreateTask => 600,
            Self::UpdateTask => 400,
            Self::DeleteTask => 300,
        };
        Duration::from_millis(millis)
    }
}

/// Upper bound on the scale factor; larger values are clamped
pub const MAX_LATENCY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyProfile {
    scale: f64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl LatencyProfile {
    /// Multiply every base delay by `scale`, clamped to
    /// [`MAX_LATENCY_SCALE`]; negative or non-finite values disable latency
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale.min(MAX_LATENCY_SCALE)
        } else {
            0.0
        };
        Self { scale }
    }

    pub fn none() -> Self {
        Self { scale: 0.0 }
    }

    pub fn is_disabled(&self) -> bool {
        self.scale == 0.0
    }

    pub fn delay_for(&self, endpoint: Endpoint) -> Duration {
        endpoint.base_delay().mul_f64(self.scale)
    }

    pub async fn wait(&self, endpoint: Endpoint) {
        if self.is_disabled() {
            return;
        }
        tokio::time::sleep(self.delay_for(endpoint)).await;
    }
}
