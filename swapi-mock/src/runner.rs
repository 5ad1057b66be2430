use crate::{
    data::{RequestData, ResponseData},
    error::Error,
    mock_server::MockServer,
    util,
};
use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use lazy_static::lazy_static;
use std::{
    convert::Infallible,
    env,
    net::SocketAddr,
    sync::{mpsc, Mutex, Once, PoisonError},
    thread,
};
use tokio::runtime::Runtime;
use tracing::{error, info};

pub const DEFAULT_PORT: u16 = 61417;

static INITIALIZE_SERVER: Once = Once::new();

lazy_static! {
    static ref PORT: u16 = env::var("SWAPI_MOCK_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    static ref START_ERROR: Mutex<Option<String>> = Mutex::new(None);
}

/// The port the mock server listens on.
pub fn port() -> u16 {
    *PORT
}

/// Base URL of the mock server, without a trailing slash.
pub fn base_url() -> String {
    format!("http://127.0.0.1:{}", port())
}

/// Starts the server thread on first call and waits until it's bound.
pub(crate) fn start_once() -> Result<(), Error> {
    INITIALIZE_SERVER.call_once(|| {
        if let Err(e) = spawn_server() {
            error!("mock server failed to start: {}", e);
            *START_ERROR.lock().unwrap_or_else(PoisonError::into_inner) = Some(e);
        }
    });

    match START_ERROR.lock()?.as_ref() {
        Some(message) => Err(Error::ServerStart(message.clone())),
        None => Ok(()),
    }
}

fn spawn_server() -> Result<(), String> {
    let (ready_tx, ready_rx) = mpsc::channel();
    let addr = SocketAddr::from(([127, 0, 0, 1], port()));

    thread::Builder::new()
        .name("swapi-mock-server".into())
        .spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                    return;
                }
            };

            runtime.block_on(async move {
                let builder = match Server::try_bind(&addr) {
                    Ok(builder) => builder,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                let server = builder.serve(make_service_fn(|_| async {
                    Ok::<_, Infallible>(service_fn(serve))
                }));

                info!(%addr, "mock server listening");
                let _ = ready_tx.send(Ok(()));

                if let Err(e) = server.await {
                    error!("mock server error: {}", e);
                }
            });
        })
        .map_err(|e| e.to_string())?;

    ready_rx
        .recv()
        .map_err(|_| String::from("the server thread exited before binding"))?
}

async fn serve(request: Request<Body>) -> Result<Response<Body>, Infallible> {
    let response = match handle_request(request).await {
        Ok(response) => response,
        Err(err) => {
            error!("failed to handle request: {}", err);
            let body = err.to_string();
            MockServer::set_error(err);

            let mut response = Response::new(Body::from(body));
            *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    };

    Ok(response)
}

async fn handle_request(mut request: Request<Body>) -> Result<Response<Body>, Error> {
    let request_data = read_request_data(&mut request).await?;
    let response_data = MockServer::handle_request(request_data).await?;

    build_response(&response_data)
}

fn build_response(response_data: &ResponseData) -> Result<Response<Body>, Error> {
    let mut response_builder = Response::builder().status(response_data.status_code);

    util::put_headers(
        response_builder.headers_mut().ok_or(Error::InvalidBody)?,
        util::filter_headers(&response_data.headers),
    )?;

    Ok(response_builder.body(response_data.body.clone().into())?)
}

async fn read_request_data(request: &mut Request<Body>) -> Result<RequestData, Error> {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let headers = util::extract_headers(request.headers());

    let body = body::to_bytes(request.body_mut())
        .await
        .map_err(|_| Error::InvalidBody)?;

    Ok(RequestData {
        method,
        uri,
        headers,
        body: String::from_utf8_lossy(&body).into(),
    })
}
