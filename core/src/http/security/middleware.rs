//! The token-security gate, as Actix middleware.
//!
//! One pre-handler pass per request: extract a token, resolve it to a
//! principal (cache first, realm on miss, write-through on success), publish
//! both into the request scope, notify the listener, then evaluate the
//! route's declared requirements. A denial or collaborator failure
//! short-circuits before the handler runs; otherwise the request is
//! forwarded untouched.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::cache::{CacheManager, NoOpCacheManager};
use crate::http::security::context::AuthenticationContext;
use crate::http::security::listener::{AuthenticationListener, NoOpAuthenticationListener};
use crate::http::security::locale::{DefaultLocaleResolver, LocaleResolver};
use crate::http::security::parser::{HttpHeaderTokenParser, TokenParse, TokenParser};
use crate::http::security::realm::UserDetailsRealm;
use crate::http::security::requirements::{
    AuthenticationStrategy, RequirementRegistry, RoutePolicy, RouteRequirements,
};
use crate::http::security::user_details::UserDetails;

/// Security middleware factory.
///
/// All collaborators are fixed at construction; once a `RestfulSecurity`
/// value is wrapped into an app it is effectively immutable.
///
/// Defaults: bearer-token parsing, no cache, no listener, process-default
/// locale, [`AuthenticationStrategy::All`], empty registry.
///
/// # Example
/// ```ignore
/// App::new().wrap(
///     RestfulSecurity::new(Arc::new(my_realm))
///         .cache_manager(Arc::new(InMemoryCacheManager::new()))
///         .strategy(AuthenticationStrategy::OnlyAnnotated)
///         .requirements(
///             RequirementRegistry::new()
///                 .route("/admin/.*", RouteRequirements::new().roles(Logic::All, &["ADMIN"])),
///         ),
/// )
/// ```
pub struct RestfulSecurity {
    token_parser: Arc<dyn TokenParser>,
    realm: Arc<dyn UserDetailsRealm>,
    cache_manager: Arc<dyn CacheManager>,
    listener: Arc<dyn AuthenticationListener>,
    locale_resolver: Arc<dyn LocaleResolver>,
    strategy: AuthenticationStrategy,
    registry: Arc<RequirementRegistry>,
}

impl RestfulSecurity {
    pub fn new(realm: Arc<dyn UserDetailsRealm>) -> Self {
        RestfulSecurity {
            token_parser: Arc::new(HttpHeaderTokenParser::bearer()),
            realm,
            cache_manager: Arc::new(NoOpCacheManager),
            listener: Arc::new(NoOpAuthenticationListener),
            locale_resolver: Arc::new(DefaultLocaleResolver),
            strategy: AuthenticationStrategy::default(),
            registry: Arc::new(RequirementRegistry::new()),
        }
    }

    pub fn token_parser(mut self, token_parser: Arc<dyn TokenParser>) -> Self {
        self.token_parser = token_parser;
        self
    }

    pub fn cache_manager(mut self, cache_manager: Arc<dyn CacheManager>) -> Self {
        self.cache_manager = cache_manager;
        self
    }

    pub fn listener(mut self, listener: Arc<dyn AuthenticationListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn locale_resolver(mut self, locale_resolver: Arc<dyn LocaleResolver>) -> Self {
        self.locale_resolver = locale_resolver;
        self
    }

    pub fn strategy(mut self, strategy: AuthenticationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn requirements(mut self, registry: RequirementRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RestfulSecurity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RestfulSecurityMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RestfulSecurityMiddleware {
            service: Rc::new(service),
            gate: Arc::new(Gate {
                token_parser: Arc::clone(&self.token_parser),
                realm: Arc::clone(&self.realm),
                cache_manager: Arc::clone(&self.cache_manager),
                listener: Arc::clone(&self.listener),
                locale_resolver: Arc::clone(&self.locale_resolver),
                strategy: self.strategy,
                registry: Arc::clone(&self.registry),
            }),
        })
    }
}

/// What the gate decided before any authentication work.
enum GateDecision {
    /// Forward unconditionally; no token parsing, no context.
    PassThrough,
    /// Run the authentication pipeline; `requirements` is `None` for
    /// unregistered routes resolved under [`AuthenticationStrategy::All`].
    Enforce {
        requirements: Option<RouteRequirements>,
        handler: String,
    },
}

pub(crate) struct Gate {
    token_parser: Arc<dyn TokenParser>,
    realm: Arc<dyn UserDetailsRealm>,
    cache_manager: Arc<dyn CacheManager>,
    listener: Arc<dyn AuthenticationListener>,
    locale_resolver: Arc<dyn LocaleResolver>,
    strategy: AuthenticationStrategy,
    registry: Arc<RequirementRegistry>,
}

impl Gate {
    /// Registry lookup and the strategy fast path. Runs before any token
    /// parsing so unprotected endpoints pay nothing.
    fn decide(&self, req: &ServiceRequest) -> GateDecision {
        match self.registry.lookup(req.method(), req.path()) {
            Some(matched) => match matched.policy {
                RoutePolicy::Permit => {
                    log::debug!("{} {} permitted, skipping authentication", req.method(), req.path());
                    GateDecision::PassThrough
                }
                RoutePolicy::Require(requirements) => {
                    if self.strategy == AuthenticationStrategy::OnlyAnnotated
                        && requirements.is_empty()
                    {
                        GateDecision::PassThrough
                    } else {
                        GateDecision::Enforce {
                            requirements: Some(requirements.clone()),
                            handler: matched.pattern.to_string(),
                        }
                    }
                }
            },
            None => {
                if self.strategy == AuthenticationStrategy::OnlyAnnotated {
                    GateDecision::PassThrough
                } else {
                    GateDecision::Enforce {
                        requirements: None,
                        handler: req.path().to_string(),
                    }
                }
            }
        }
    }

    /// Token and principal resolution followed by the requirement check.
    ///
    /// Must run inside an [`AuthenticationContext::scope`].
    async fn pre_handle(
        &self,
        req: &ServiceRequest,
        requirements: Option<&RouteRequirements>,
        handler: &str,
    ) -> Result<(), Error> {
        let locale = self.locale_resolver.resolve_locale(req);

        let mut resolved: Option<UserDetails> = None;
        match self.token_parser.parse(req, &locale) {
            TokenParse::Token(token) => {
                // The raw token is observable downstream even when no
                // principal resolves for it.
                AuthenticationContext::set_token(token.clone());
                req.extensions_mut().insert(token.clone());

                resolved = match self.cache_manager.get_user_details(&token).await {
                    Some(cached) => Some(cached),
                    None => {
                        let loaded = self.realm.load_user_details(&token).await?;
                        if let Some(user_details) = &loaded {
                            self.cache_manager
                                .save_user_details(&token, user_details.clone())
                                .await;
                        }
                        loaded
                    }
                };

                if let Some(user_details) = &resolved {
                    req.extensions_mut().insert(user_details.clone());
                    self.listener.on_authenticated(req, user_details, handler);
                }
                AuthenticationContext::set_user_details(resolved.clone());
            }
            TokenParse::Malformed => {
                // Present-but-unparseable behaves like absent.
                log::debug!(
                    "malformed credential on {} {}, treating as anonymous",
                    req.method(),
                    req.path()
                );
            }
            TokenParse::Missing => {}
        }

        if let Some(requirements) = requirements {
            requirements.check(resolved.as_ref())?;
        }

        Ok(())
    }
}

/// Security middleware service.
pub struct RestfulSecurityMiddleware<S> {
    service: Rc<S>,
    gate: Arc<Gate>,
}

impl<S, B> Service<ServiceRequest> for RestfulSecurityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);

        match gate.decide(&req) {
            GateDecision::PassThrough => Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            }),
            GateDecision::Enforce { requirements, handler } => Box::pin(async move {
                // The context slot lives exactly as long as this request's
                // handling, denials and errors included.
                AuthenticationContext::scope(async move {
                    match gate.pre_handle(&req, requirements.as_ref(), &handler).await {
                        Ok(()) => {
                            let res = service.call(req).await?;
                            Ok(res.map_into_left_body())
                        }
                        Err(denied) => {
                            log::debug!(
                                "{} {} blocked before handler: {}",
                                req.method(),
                                req.path(),
                                denied
                            );
                            let response = denied.error_response().map_into_right_body();
                            Ok(req.into_response(response))
                        }
                    }
                })
                .await
            }),
        }
    }
}
