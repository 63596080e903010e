//! Backend commands queued from UI to backend worker.

use client_core::report::EventReport;
use shared::domain::{EventId, OrderId};

/// Screen-scoped commands carry the activation number of the screen that issued
/// them so late responses can be matched against the screen still on display.
pub enum BackendCommand {
    LoadEvents {
        activation: u64,
    },
    DeleteEvent {
        activation: u64,
        id: EventId,
    },
    LoadOrders {
        activation: u64,
    },
    MarkOrderDelivered {
        activation: u64,
        id: OrderId,
    },
    SendResetEmail {
        email: String,
    },
    ResetPassword {
        new_password: String,
    },
    SaveReport {
        report: EventReport,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadEvents { .. } => "load_events",
            BackendCommand::DeleteEvent { .. } => "delete_event",
            BackendCommand::LoadOrders { .. } => "load_orders",
            BackendCommand::MarkOrderDelivered { .. } => "mark_order_delivered",
            BackendCommand::SendResetEmail { .. } => "send_reset_email",
            BackendCommand::ResetPassword { .. } => "reset_password",
            BackendCommand::SaveReport { .. } => "save_report",
        }
    }
}
