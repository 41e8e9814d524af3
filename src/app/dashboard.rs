use crate::app::panel::Panel;
use crate::domain::model::SchemaRegistry;
use crate::domain::role::Role;
use crate::error::ConsoleResult;
use crate::infra::source::DataSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The fixed set of panels one role sees. Panels share nothing but the
/// data source handle.
pub struct Dashboard {
    role: Role,
    panels: Vec<Panel>,
}

impl Dashboard {
    pub fn new(
        role: Role,
        registry: &SchemaRegistry,
        source: Arc<dyn DataSource>,
        page_size: usize,
        load_timeout: Option<Duration>,
    ) -> ConsoleResult<Self> {
        let panels = role
            .panels()
            .iter()
            .map(|entity| {
                let model = registry.require(entity)?;
                Ok(Panel::new(model, source.clone(), page_size, load_timeout))
            })
            .collect::<ConsoleResult<Vec<_>>>()?;
        Ok(Self { role, panels })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn panel_names(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.entity()).collect()
    }

    pub fn panel(&self, entity: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.entity() == entity)
    }

    pub fn panel_mut(&mut self, entity: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.entity() == entity)
    }

    /// Loads every panel; returns how many loaded successfully.
    ///
    /// Failures stay on the failing panel's banner.
    pub async fn load_all(&mut self) -> usize {
        let mut loaded = 0;
        for panel in &mut self.panels {
            if panel.load().await.is_ok() {
                loaded += 1;
            }
        }
        info!(role = %self.role, loaded, total = self.panels.len(), "dashboard loaded");
        loaded
    }

    pub fn into_panels(self) -> Vec<Panel> {
        self.panels
    }
}
