use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use shared::{ContactForm, ContactResponse, ErrorResponse, InferenceResponse};

pub enum ApiError {
    /// The server refused the request with a message meant for the user.
    Rejected(String),
    Failed(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Rejected(msg) | ApiError::Failed(msg) => msg,
        }
    }
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) if (400..500).contains(&status) => ApiError::Rejected(body.error),
        Ok(body) => ApiError::Failed(format!("Server error: {} - {}", status, body.error)),
        Err(_) => ApiError::Failed(format!("Server error: {}", status)),
    }
}

pub async fn analyze_image(file: &GlooFile) -> Result<InferenceResponse, ApiError> {
    let form_data = web_sys::FormData::new()
        .map_err(|e| ApiError::Failed(format!("Failed to build form: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .map_err(|e| ApiError::Failed(format!("Failed to attach image: {:?}", e)))?;

    let response = Request::post("/api/inference")
        .body(form_data)
        .map_err(|e| ApiError::Failed(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Failed(format!("Network error: {}", e)))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }

    response
        .json::<InferenceResponse>()
        .await
        .map_err(|e| ApiError::Failed(format!("Failed to parse response: {}", e)))
}

pub async fn send_contact(form: &ContactForm) -> Result<ContactResponse, ApiError> {
    let response = Request::post("/api/contact")
        .json(form)
        .map_err(|e| ApiError::Failed(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Failed(format!("Network error: {}", e)))?;

    if !response.ok() {
        return Err(error_from(response).await);
    }

    response
        .json::<ContactResponse>()
        .await
        .map_err(|e| ApiError::Failed(format!("Failed to parse response: {}", e)))
}
