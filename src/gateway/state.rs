use std::sync::Arc;

use crate::search::SearchEngine;

/// Shared handler state: one engine serving every in-flight request.
pub struct HandlerState<J, V, S> {
    pub engine: Arc<SearchEngine<J, V, S>>,
}

impl<J, V, S> HandlerState<J, V, S> {
    pub fn new(engine: Arc<SearchEngine<J, V, S>>) -> Self {
        Self { engine }
    }
}

// Manual impl: the derive would demand Clone on the collaborator types.
impl<J, V, S> Clone for HandlerState<J, V, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}
