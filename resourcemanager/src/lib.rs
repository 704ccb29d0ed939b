#![allow(clippy::result_large_err)]
//! # google-cloud-resourcemanager
//!
//! Google Cloud Resource Manager client library, covering what fleet administration tools need:
//! listing projects and reading or updating project IAM policies.
//!
//! * [About Resource Manager](https://cloud.google.com/resource-manager/)
//! * [REST API Documentation](https://cloud.google.com/resource-manager/reference/rest/v1/projects)
//!
//! ## Quick Start
//!
//! ```
//! use google_cloud_resourcemanager::client::{Client, ClientConfig};
//! use google_cloud_resourcemanager::http::projects::get_iam_policy::GetIamPolicyRequest;
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config);
//!     for project in client.project().list_active().await.unwrap() {
//!         let policy = client
//!             .project()
//!             .get_iam_policy(&project.project_id, &GetIamPolicyRequest::with_conditions())
//!             .await
//!             .unwrap();
//!         println!("{} {:?}", project.project_id, policy.bindings);
//!     }
//! }
//! ```
pub mod client;
pub mod credentials;
pub mod http;
