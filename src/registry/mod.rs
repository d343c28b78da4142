mod args;
pub mod patterns;
mod table;

use std::{future::Future, sync::Arc};

use futures_util::future::BoxFuture;

use crate::{
    context::ScenarioContext,
    error::RegistryError,
    steps::{self, HttpSteps, StepResult},
};

pub use args::StepArgs;
pub use table::StepTable;

pub type StepFuture = BoxFuture<'static, StepResult>;

/// Type-erased step handler: incoming context plus captured arguments.
pub type StepHandler = Arc<dyn Fn(ScenarioContext, StepArgs) -> StepFuture + Send + Sync>;

/// Anything that can match step text against registered patterns.
pub trait StepRegistry {
    fn register(&mut self, pattern: &str, handler: StepHandler) -> Result<(), RegistryError>;
}

#[derive(Clone)]
pub struct StepDefinition {
    pub pattern: &'static str,
    pub handler: StepHandler,
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

pub fn step_handler<F, Fut>(handler: F) -> StepHandler
where
    F: Fn(ScenarioContext, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = StepResult> + Send + 'static,
{
    Arc::new(move |context: ScenarioContext, args: StepArgs| -> StepFuture {
        Box::pin(handler(context, args))
    })
}

/// The ten HTTP step definitions, ready to hand to any registry.
pub fn http_step_definitions(http: HttpSteps) -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            pattern: patterns::MAKE_A_REQUEST,
            handler: with_http(&http, make_a_request),
        },
        StepDefinition {
            pattern: patterns::RESPONSE_CODE_EQUALS,
            handler: sync_step(response_code_equals),
        },
        StepDefinition {
            pattern: patterns::RESPONSE_IS_VALID_JSON,
            handler: sync_step(|context, _args| steps::valid_json(context)),
        },
        StepDefinition {
            pattern: patterns::RESPONSE_IS,
            handler: sync_step(response_is),
        },
        StepDefinition {
            pattern: patterns::RESPONSE_HEADER_EQUALS,
            handler: sync_step(response_header_equals),
        },
        StepDefinition {
            pattern: patterns::HAVE_A_REQUEST,
            handler: with_http(&http, have_a_request),
        },
        StepDefinition {
            pattern: patterns::SET_REQUEST_HEADER,
            handler: sync_step(set_request_header),
        },
        StepDefinition {
            pattern: patterns::SET_REQUEST_BODY,
            handler: sync_step(set_request_body),
        },
        StepDefinition {
            pattern: patterns::REQUEST_HAS_BODY,
            handler: sync_step(set_request_body),
        },
        StepDefinition {
            pattern: patterns::MAKE_THE_REQUEST,
            handler: with_http(&http, make_the_request),
        },
    ]
}

fn sync_step<F>(step: F) -> StepHandler
where
    F: Fn(ScenarioContext, &StepArgs) -> StepResult + Send + Sync + 'static,
{
    let step = Arc::new(step);
    step_handler(move |context, args| {
        let step = Arc::clone(&step);
        async move { (*step)(context, &args) }
    })
}

fn with_http<F>(http: &HttpSteps, step: F) -> StepHandler
where
    F: Fn(HttpSteps, ScenarioContext, StepArgs) -> StepFuture + Send + Sync + 'static,
{
    let http = http.clone();
    Arc::new(move |context: ScenarioContext, args: StepArgs| -> StepFuture {
        step(http.clone(), context, args)
    })
}

fn make_a_request(http: HttpSteps, context: ScenarioContext, args: StepArgs) -> StepFuture {
    Box::pin(async move {
        let (method, url) = (args.str(0)?, args.str(1)?);
        http.make_request(context, method, url).await
    })
}

fn make_the_request(http: HttpSteps, context: ScenarioContext, _args: StepArgs) -> StepFuture {
    Box::pin(async move { http.make_the_request(context).await })
}

fn have_a_request(http: HttpSteps, context: ScenarioContext, args: StepArgs) -> StepFuture {
    Box::pin(async move { http.have_request(context, args.str(0)?, args.str(1)?) })
}

fn response_code_equals(context: ScenarioContext, args: &StepArgs) -> StepResult {
    steps::response_code_equals(context, args.parse(0)?)
}

fn response_is(context: ScenarioContext, args: &StepArgs) -> StepResult {
    steps::response_is(context, args.str(0)?)
}

fn response_header_equals(context: ScenarioContext, args: &StepArgs) -> StepResult {
    steps::response_header_equals(context, args.str(0)?, args.str(1)?)
}

fn set_request_header(context: ScenarioContext, args: &StepArgs) -> StepResult {
    steps::set_request_header(context, args.str(0)?, args.str(1)?)
}

fn set_request_body(context: ScenarioContext, args: &StepArgs) -> StepResult {
    steps::set_request_body(context, args.str(0)?)
}

/// Registers every HTTP step with `registry`.
pub fn register_http_steps<R>(registry: &mut R, http: HttpSteps) -> Result<(), RegistryError>
where
    R: StepRegistry + ?Sized,
{
    for definition in http_step_definitions(http) {
        registry.register(definition.pattern, definition.handler)?;
    }
    Ok(())
}
