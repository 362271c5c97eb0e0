//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so presentation concerns stay out
//! of the business types. Orders render as a markdown pipeline board: every
//! stage on its own line with a status icon, the current stage marked, and
//! completion timestamps where present.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Order, OrderSummary, StageStatus, Warehouse, STAGES};

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Order {}. {}", self.id, self.customer)?;
        writeln!(f)?;

        // Metadata section
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(email) = &self.email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(gstin) = &self.gstin {
            writeln!(f, "- GSTIN: {gstin}")?;
        }
        if let Some(address) = &self.site_address {
            writeln!(f, "- Site: {address}")?;
        }
        if self.zero_amount_estimate {
            writeln!(f, "- Zero-amount estimate")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Pipeline")?;
        writeln!(f)?;
        for descriptor in &STAGES {
            let marker = if self.current_stage == Some(descriptor.key) {
                "➤"
            } else {
                " "
            };
            write!(
                f,
                "{marker} {} ({})",
                descriptor.label,
                self.stage_status(descriptor.key).with_icon()
            )?;
            if let Some(completed) = self.completed_at.get(&descriptor.key) {
                write!(f, " — {}", LocalDateTime(completed))?;
            }
            writeln!(f)?;
        }
        if self.pipeline_complete() {
            writeln!(f, "\nPipeline complete.")?;
        }

        if !self.details.is_empty() {
            writeln!(f, "\n## Details")?;
            writeln!(f)?;
            for (field, value) in &self.details {
                match value.as_str() {
                    Some(text) => writeln!(f, "- {field}: {text}")?,
                    None => writeln!(f, "- {field}: {value}")?,
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.current_stage {
            Some(key) => key.label(),
            None => "Complete",
        };
        writeln!(f, "## {}. {}", self.id, self.customer)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Stage: {stage}")?;
        writeln!(
            f,
            "- Progress: {}/{} stages completed",
            self.completed_stages,
            STAGES.len()
        )?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {}. {} (manager: {})", self.id, self.name, self.manager)
    }
}
