use crate::core::session::{EnrollmentSession, SubmitOutcome};
use crate::core::validation::Field;
use crate::core::wizard::Step;
use crate::domain::model::RegisteredStudent;
use crate::domain::ports::{AddressLookup, AlertPresenter, RegistrationApi};
use crate::utils::error::Result;
use crate::utils::format::format_phone;
use chrono::Local;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Registered(RegisteredStudent),
    Cancelled,
}

enum MenuAction {
    Continue,
    Back,
    Jump,
    Cancel,
    Register,
}

/// Drives one enrollment session through the terminal until the student is
/// registered or the operator cancels.
pub async fn run<L, R, A>(session: &mut EnrollmentSession<L, R, A>) -> Result<FlowOutcome>
where
    L: AddressLookup,
    R: RegistrationApi,
    A: AlertPresenter,
{
    let theme = ColorfulTheme::default();

    loop {
        let step = session.wizard().step();
        print_header(step);

        match step {
            Step::PersonalData => {
                let value = prompt_field(&theme, session, Field::FullName, "Full name")?;
                session.wizard_mut().set_full_name(value);
                let value = prompt_field(&theme, session, Field::Email, "Email")?;
                session.wizard_mut().set_email(value);
                let value = prompt_field(&theme, session, Field::NationalId, "National ID (CPF)")?;
                session.wizard_mut().set_national_id(value);
                let value =
                    prompt_field(&theme, session, Field::BirthDate, "Birth date (YYYY-MM-DD)")?;
                session.wizard_mut().set_birth_date(value);
                let value = prompt_field(&theme, session, Field::Phone, "Phone")?;
                session.wizard_mut().set_phone(value);
            }
            Step::Address => {
                let value = prompt_field(&theme, session, Field::PostalCode, "Postal code")?;
                session.set_postal_code(value).await;
                let value = prompt_field(&theme, session, Field::Street, "Street")?;
                session.wizard_mut().set_street(value);
                let value = prompt_field(&theme, session, Field::Number, "Number")?;
                session.wizard_mut().set_number(value);
                let value = prompt_field(&theme, session, Field::District, "District")?;
                session.wizard_mut().set_district(value);
                let value = prompt_field(&theme, session, Field::City, "City")?;
                session.wizard_mut().set_city(value);
                let value = prompt_field(&theme, session, Field::State, "State")?;
                session.wizard_mut().set_state(value);
                let value = prompt_field(&theme, session, Field::StateCode, "State code")?;
                session.wizard_mut().set_state_code(value);
            }
            Step::StudentInfo => {
                let current = session.wizard().info().has_mobility_limitation;
                let has_limitation = Confirm::with_theme(&theme)
                    .with_prompt("Does the student have a mobility limitation?")
                    .default(current)
                    .interact()?;
                session.wizard_mut().set_mobility_limitation(has_limitation);

                let notes = Input::<String>::with_theme(&theme)
                    .with_prompt("Notes (optional)")
                    .allow_empty(true)
                    .with_initial_text(session.wizard().info().notes.clone())
                    .interact_text()?;
                session.wizard_mut().set_notes(notes);
            }
            Step::Confirmation => print_review(session),
        }

        match navigation_menu(&theme, step)? {
            MenuAction::Continue => {
                session.advance(Local::now().date_naive());
            }
            MenuAction::Back => {
                session.retreat();
            }
            MenuAction::Jump => {
                let reachable: Vec<Step> = Step::ALL
                    .into_iter()
                    .filter(|s| *s <= step)
                    .collect();
                let labels: Vec<&str> = reachable.iter().map(|s| s.label()).collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Jump to step")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                session.jump_to(reachable[index]);
            }
            MenuAction::Cancel => {
                session.cancel();
                return Ok(FlowOutcome::Cancelled);
            }
            MenuAction::Register => {
                if let SubmitOutcome::Registered(student) = session.submit().await {
                    return Ok(FlowOutcome::Registered(student));
                }
                // rejected or failed: state is intact, stay on confirmation
            }
        }
    }
}

fn print_header(step: Step) {
    println!();
    println!(
        "{} Step {}/4: {}",
        style("◆").cyan(),
        step.number(),
        style(step.label()).bold()
    );
    println!("{}", style("─".repeat(50)).dim());
}

fn prompt_field<L, R, A>(
    theme: &ColorfulTheme,
    session: &EnrollmentSession<L, R, A>,
    field: Field,
    label: &str,
) -> Result<String>
where
    L: AddressLookup,
    R: RegistrationApi,
    A: AlertPresenter,
{
    if let Some(message) = session.wizard().error_for(field) {
        eprintln!("  {} {}", style("✗").red(), message);
    }
    let wizard = session.wizard();
    let current = match field {
        Field::FullName => &wizard.personal().full_name,
        Field::Email => &wizard.personal().email,
        Field::NationalId => &wizard.personal().national_id,
        Field::BirthDate => &wizard.personal().birth_date,
        Field::Phone => &wizard.personal().phone,
        Field::PostalCode => &wizard.address().postal_code,
        Field::Street => &wizard.address().street,
        Field::Number => &wizard.address().number,
        Field::District => &wizard.address().district,
        Field::City => &wizard.address().city,
        Field::State => &wizard.address().state,
        Field::StateCode => &wizard.address().state_code,
        Field::MobilityLimitation | Field::Notes => &wizard.info().notes,
    };
    let value = Input::<String>::with_theme(theme)
        .with_prompt(label)
        .allow_empty(true)
        .with_initial_text(current.clone())
        .interact_text()?;
    Ok(value)
}

fn navigation_menu(theme: &ColorfulTheme, step: Step) -> Result<MenuAction> {
    let mut items: Vec<&str> = Vec::new();
    let mut actions: Vec<MenuAction> = Vec::new();

    if step == Step::Confirmation {
        items.push("Register student");
        actions.push(MenuAction::Register);
    } else {
        items.push("Continue");
        actions.push(MenuAction::Continue);
    }
    if step != Step::PersonalData {
        items.push("Back");
        actions.push(MenuAction::Back);
        items.push("Jump to an earlier step");
        actions.push(MenuAction::Jump);
    }
    items.push("Cancel registration");
    actions.push(MenuAction::Cancel);

    let index = Select::with_theme(theme)
        .with_prompt("Next")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(actions.swap_remove(index))
}

fn print_review<L, R, A>(session: &EnrollmentSession<L, R, A>)
where
    L: AddressLookup,
    R: RegistrationApi,
    A: AlertPresenter,
{
    let wizard = session.wizard();
    let personal = wizard.personal();
    let address = wizard.address();
    let info = wizard.info();

    println!("  {:<14} {}", style("Name:").bold(), personal.full_name);
    println!("  {:<14} {}", style("Email:").bold(), personal.email);
    println!("  {:<14} {}", style("National ID:").bold(), personal.national_id);
    println!("  {:<14} {}", style("Birth date:").bold(), personal.birth_date);
    println!("  {:<14} {}", style("Phone:").bold(), format_phone(&personal.phone));
    println!(
        "  {:<14} {}, {} - {}, {}/{}",
        style("Address:").bold(),
        address.street,
        address.number,
        address.district,
        address.city,
        address.state_code
    );
    println!("  {:<14} {}", style("Postal code:").bold(), address.postal_code);
    println!(
        "  {:<14} {}",
        style("Mobility:").bold(),
        if info.has_mobility_limitation { "has limitation" } else { "none" }
    );
    if !info.notes.is_empty() {
        println!("  {:<14} {}", style("Notes:").bold(), info.notes);
    }
    println!();
}
