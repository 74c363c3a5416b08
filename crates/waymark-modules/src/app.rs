//! Host module

use waymark_application::route_module;

/// Entry screen of the host module
#[derive(Debug, Default)]
pub struct MainScreen;

route_module! {
    module app;
    group app {
        screen "/app/MainScreen" => MainScreen,
    }
}
