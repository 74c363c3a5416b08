//! Parameterized screen module

use std::sync::Arc;

use waymark_application::{route_extras, route_module};

use crate::base::{ComponentService, TestObj};

/// Screen that receives its state through injected parameters
#[derive(Default)]
pub struct MainScreen {
    pub name: Option<String>,
    pub age: i32,
    pub height: i32,
    pub weight: i32,
    pub girl: bool,
    pub tags: Option<Vec<String>>,
    pub scores: Option<Box<[i32]>>,
    pub obj: Option<TestObj>,
    pub objs: Option<Vec<TestObj>>,
    pub service: Option<Arc<dyn ComponentService>>,
}

impl MainScreen {
    /// One-line description of the injected state
    pub fn summary(&self) -> String {
        format!(
            "{} age={} height={} weight={}",
            self.name.as_deref().unwrap_or("<anonymous>"),
            self.age,
            self.height,
            self.weight
        )
    }
}

route_module! {
    module library3;
    group library3 {
        screen "/library3/MainScreen" => MainScreen,
    }
}

route_extras! {
    MainScreen {
        name: Option<String>,
        age: i32,
        height: i32,
        weight: i32,
        girl: bool = "boy",
        tags: Option<Vec<String>>,
        scores: Option<Box<[i32]>>,
        obj: Option<TestObj>,
        objs: Option<Vec<TestObj>>,
        service: Option<Arc<dyn ComponentService>> = "/library2/StringService",
    }
}
