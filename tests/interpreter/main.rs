mod classes;
mod control_flow;
mod diagnostics;
mod functions;
mod helpers;
mod operators;
mod prelude;
mod scopes;
