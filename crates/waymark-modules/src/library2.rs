//! Services module

use std::sync::Arc;

use tracing::info;
use waymark_application::{route_extras, route_module};

use crate::base::ComponentService;

/// Plain service with no dependencies
#[derive(Debug, Default)]
pub struct StringService;

impl ComponentService for StringService {
    fn do_something(&self) -> String {
        info!("StringService invoked in library2");
        "library2 StringService".to_string()
    }
}

/// Service that wraps another one resolved by path
#[derive(Default)]
pub struct EchoService {
    pub inner: Option<Arc<dyn ComponentService>>,
    pub prefix: Option<String>,
}

impl ComponentService for EchoService {
    fn do_something(&self) -> String {
        let prefix = self.prefix.as_deref().unwrap_or("echo");
        match &self.inner {
            Some(inner) => format!("{prefix}: {}", inner.do_something()),
            None => format!("{prefix}: <no inner service>"),
        }
    }
}

route_module! {
    module library2;
    group library2 {
        service "/library2/StringService" => StringService as dyn ComponentService,
        service "/library2/EchoService" => EchoService as dyn ComponentService,
    }
}

route_extras! {
    EchoService {
        inner: Option<Arc<dyn ComponentService>> = "/library2/StringService",
        prefix: Option<String>,
    }
}
