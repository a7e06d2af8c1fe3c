use crate::{
    chart::{
        chart_params::ChartParams, container_identity::ContainerIdentity,
        script_loader::ScriptLoader, widget_manager::ChartWidgetManager,
    },
    models::traits::chart_library::ChartLibrary,
};
use anyhow::{anyhow, Result};
use std::{sync::Arc, time::Duration};

pub struct ChartWidgetManagerBuilder {
    pub library: Option<Arc<dyn ChartLibrary>>,
    pub loader: Option<Arc<ScriptLoader>>,
    pub params: Option<ChartParams>,
    pub load_timeout: Option<Duration>,
}

impl ChartWidgetManagerBuilder {
    pub fn new() -> Self {
        ChartWidgetManagerBuilder {
            library: None,
            loader: None,
            params: None,
            load_timeout: None,
        }
    }

    pub fn library(mut self, library: Arc<dyn ChartLibrary>) -> Self {
        self.library = Some(library);
        self
    }

    /// Shares a process-wide loader. Without one the manager gets its own.
    pub fn loader(mut self, loader: Arc<ScriptLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn params(mut self, params: ChartParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn load_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = Some(load_timeout);
        self
    }

    pub fn build(&self) -> Result<ChartWidgetManager> {
        let library = self
            .library
            .clone()
            .ok_or(anyhow!("Chart library is required to build ChartWidgetManager."))?;
        let params = self
            .params
            .clone()
            .ok_or(anyhow!("Chart params are required to build ChartWidgetManager."))?;

        if params.symbol.trim().is_empty() {
            return Err(anyhow!("Symbol is required to build ChartWidgetManager."));
        }

        let loader = self
            .loader
            .clone()
            .unwrap_or_else(|| Arc::new(ScriptLoader::new(library.clone())));

        Ok(ChartWidgetManager {
            library,
            loader,
            container_id: ContainerIdentity::create(&params.symbol),
            params,
            container: None,
            session: None,
            last_key: 0,
            load_timeout: self.load_timeout,
        })
    }
}

impl Default for ChartWidgetManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
