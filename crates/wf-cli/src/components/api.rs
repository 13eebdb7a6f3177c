use crate::models::HttpMethod;
use serde_json::Value;
use wf_api::{ApiClient, ApiError, RequestOptions};

/// Make one call through the authenticated JSON client and print the result.
/// Relative paths are joined onto WF_API_BASE_URL.
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct ApiArgs {
    /// Path or absolute URL to call
    pub path: String,

    /// HTTP method
    #[arg(long, short, value_enum, default_value = "get")]
    pub method: HttpMethod,

    /// Request body, sent as is
    #[arg(long, short)]
    pub data: Option<String>,

    /// Extra header as `Name: value`. Repeatable, and wins over the defaults
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

/// Turn the command line arguments into request options
pub fn request_options(args: &ApiArgs) -> Result<RequestOptions, ApiError> {
    let mut options = RequestOptions::get().with_method(args.method.into());
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| ApiError::InvalidHeader(header.clone()))?;
        options = options.with_header(name, value)?;
    }
    if let Some(data) = &args.data {
        options = options.with_body(data.clone());
    }
    Ok(options)
}

pub async fn handle_api(args: ApiArgs, client: &ApiClient) -> Result<(), ApiError> {
    let options = request_options(&args)?;
    let value: Value = client.json(&args.path, options).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
