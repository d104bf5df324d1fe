use std::{convert::Infallible, sync::Arc};

use serde::Deserialize;
use warp::{path, Filter, Rejection, Reply};

use crate::{
    admin::{Admin, AdminInternal},
    envelope::Envelope,
    error::AdminError,
    types::{
        Credentials, Employee, EmployeeDTO, EmployeeID, EmployeePageQuery, LoginView, PageResult,
    },
};

/// Build the `/admin/employee` route table.
///
/// Failures are raised as [`AdminError`] rejections; attach
/// [`handle_admin_errors`] with `.recover(...)` to turn them into failure envelopes.
pub fn build_api_route_filter(
    admin: &Admin,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let login = path!("admin" / "employee" / "login")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_login);

    let logout = path!("admin" / "employee" / "logout")
        .and(warp::post())
        .and_then(employee_logout);

    let save = path!("admin" / "employee")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_save);

    let page = path!("admin" / "employee" / "page")
        .and(warp::get())
        .and(warp::query::<EmployeePageQuery>())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_page);

    let start_or_stop = path!("admin" / "employee" / "status" / String)
        .and(warp::post())
        .and(warp::query::<StatusQuery>())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_start_or_stop);

    let get_by_id = path!("admin" / "employee" / i64)
        .and(warp::get())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_get_by_id);

    let update = path!("admin" / "employee")
        .and(warp::put())
        .and(warp::body::json())
        .and(with_admin_state(admin.internal.clone()))
        .and_then(employee_update);

    login
        .or(logout)
        .or(save)
        .or(page)
        .or(start_or_stop)
        .or(get_by_id)
        .or(update)
}

pub async fn handle_admin_errors(err: Rejection) -> Result<impl Reply, Rejection> {
    let error = if let Some(admin_error) = err.find::<AdminError>() {
        tracing::warn!(kind = ?admin_error.kind(), "employee request failed: {admin_error}");
        Envelope::<()>::failure(admin_error)
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        tracing::warn!("rejected employee query string: {invalid}");
        Envelope::failure(&AdminError::Validation(invalid.to_string()))
    } else if let Some(invalid) = err.find::<warp::body::BodyDeserializeError>() {
        tracing::warn!("rejected employee request body: {invalid}");
        Envelope::failure(&AdminError::Validation(invalid.to_string()))
    } else {
        return Err(err);
    };

    Ok(error)
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub id: i64,
}

async fn employee_login(
    input: Credentials,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<LoginView>, Rejection> {
    tracing::info!("employee login: {input:?}");

    let view = admin.login(&input).await?;

    Ok(Envelope::success(view))
}

async fn employee_logout() -> Result<Envelope<()>, Rejection> {
    Ok(Envelope::empty())
}

async fn employee_save(
    input: EmployeeDTO,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<()>, Rejection> {
    tracing::info!("adding new employee: {input:?}");

    admin.employees().save(input).await?;

    Ok(Envelope::empty())
}

async fn employee_page(
    query: EmployeePageQuery,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<PageResult<Employee>>, Rejection> {
    tracing::info!("employee page query: {query:?}");

    let page = admin.employees().page_query(query).await?;

    Ok(Envelope::success(page))
}

async fn employee_start_or_stop(
    status: String,
    query: StatusQuery,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<()>, Rejection> {
    tracing::info!("setting employee {} status to {status}", query.id);

    let status = status.parse::<i32>().map_err(|_| {
        AdminError::Validation(format!("status must be an integer, got {status:?}"))
    })?;

    admin
        .employees()
        .start_or_stop(status, EmployeeID(query.id))
        .await?;

    Ok(Envelope::empty())
}

async fn employee_get_by_id(
    id: i64,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<Employee>, Rejection> {
    let employee = admin.employees().get_by_id(EmployeeID(id)).await?;

    Ok(Envelope::success(employee))
}

async fn employee_update(
    input: EmployeeDTO,
    admin: Arc<AdminInternal>,
) -> Result<Envelope<()>, Rejection> {
    tracing::info!("editing employee: {input:?}");

    admin.employees().update(input).await?;

    Ok(Envelope::empty())
}

// functor that adds a reference to the internal admin state into the filter chain
fn with_admin_state(
    admin: Arc<AdminInternal>,
) -> impl Filter<Extract = (Arc<AdminInternal>,), Error = Infallible> + Clone {
    warp::any().map(move || admin.clone())
}
