//! Given steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, caller, create_request, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::identity::domain::{Department, Email, Identity, Role};

fn register(
    world: &TaskAccessWorld,
    email: &str,
    role: Role,
    department: Option<&str>,
) -> Result<(), eyre::Report> {
    let mut identity = Identity::new(Email::new(email)?, role);
    if let Some(name) = department {
        identity = identity.with_department(Department::new(name)?);
    }
    world
        .directory
        .insert(identity)
        .wrap_err("register scenario identity")
}

#[given(r#"an admin "{email}""#)]
fn an_admin(world: &mut TaskAccessWorld, email: String) -> Result<(), eyre::Report> {
    register(world, &email, Role::Admin, None)
}

#[given(r#"a user "{email}""#)]
fn a_user(world: &mut TaskAccessWorld, email: String) -> Result<(), eyre::Report> {
    register(world, &email, Role::User, None)
}

#[given(r#"a subadmin "{email}" in department "{department}""#)]
fn a_subadmin(
    world: &mut TaskAccessWorld,
    email: String,
    department: String,
) -> Result<(), eyre::Report> {
    register(world, &email, Role::Subadmin, Some(&department))
}

#[given(r#""{creator}" created a task "{title}" assigned to "{assignees}""#)]
fn created_task(
    world: &mut TaskAccessWorld,
    creator: String,
    title: String,
    assignees: String,
) -> Result<(), eyre::Report> {
    let request = create_request(title, &assignees);
    let created = run_async(world.service.create_task(request, &caller(&creator)?))
        .wrap_err("create task in scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#""{creator}" created an "{department}" task "{title}" assigned to "{assignees}""#)]
fn created_department_task(
    world: &mut TaskAccessWorld,
    creator: String,
    department: String,
    title: String,
    assignees: String,
) -> Result<(), eyre::Report> {
    let request = create_request(title, &assignees).with_department(department);
    let created = run_async(world.service.create_task(request, &caller(&creator)?))
        .wrap_err("create department task in scenario setup")?;
    world.current_task = Some(created);
    Ok(())
}
