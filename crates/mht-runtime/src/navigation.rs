// crates/mht-runtime/src/navigation.rs
use serde_json::Value;
use tracing::info;

pub const GUIDELINE_DETAIL_ROUTE: &str = "GuidelineDetail";
pub const DECISION_TREE_ROUTE: &str = "DecisionTree";

/// Screen transitions requested by screen state.
pub trait Navigator {
    fn go_back(&mut self);
    fn navigate(&mut self, route: &str, params: Value);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub route: String,
    pub params: Value,
}

/// Navigator that keeps a route stack and logs every transition.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    stack: Vec<RouteEntry>,
}

impl TracingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RouteEntry> {
        self.stack.last()
    }

    pub fn history(&self) -> &[RouteEntry] {
        &self.stack
    }
}

impl Navigator for TracingNavigator {
    fn go_back(&mut self) {
        match self.stack.pop() {
            Some(entry) => info!("Leaving {}", entry.route),
            None => info!("Back requested at the root screen"),
        }
    }

    fn navigate(&mut self, route: &str, params: Value) {
        info!("Navigating to {} with {}", route, params);
        self.stack.push(RouteEntry {
            route: route.to_string(),
            params,
        });
    }
}
