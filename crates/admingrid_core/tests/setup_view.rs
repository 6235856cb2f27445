use admingrid_core::view::setup::{OldDatabaseAction, SelectOption, LANGUAGE_TASK};
use admingrid_core::{LanguageCatalog, SetupForm, SetupView};

const TOKEN: &str = "3f2a9c";

fn render(form: &SetupForm) -> String {
    let lang = LanguageCatalog::en_gb();
    SetupView::new(&lang).render(form, TOKEN).into_string()
}

fn form_html<'h>(html: &'h str, id: &str) -> &'h str {
    let start = html.find(&format!(r#"id="{id}""#)).unwrap();
    let end = start + html[start..].find("</form>").unwrap();
    &html[start..end]
}

#[test]
fn step_menu_marks_the_language_step_active() {
    let html = render(&SetupForm::default());

    assert!(html.starts_with(r#"<div id="installer-view" data-page-name="setup">"#));
    assert!(html.contains(
        r#"<li><button class="active" title="Select Installation Language">Choose Language</button></li>"#
    ));
    assert!(html.contains(
        r#"<li><button title="Setup Site Name">Site Configuration</button></li>"#
    ));
    assert!(html.contains("<li><button>Finalise Installation</button></li>"));
    assert_eq!(html.matches("<li>").count(), 5);
}

#[test]
fn language_form_posts_language_set_as_json() {
    let mut form = SetupForm::default();
    form.languages.push(SelectOption::new("de-DE", "Deutsch (Deutschland)"));
    form.language = "de-DE".to_string();
    let html = render(&form);

    let language = form_html(&html, "languageForm");
    assert_eq!(LANGUAGE_TASK, "language.set");
    assert!(language.contains(r#"<input type="hidden" name="task" value="language.set">"#));
    assert!(language.contains(r#"<input type="hidden" name="format" value="json">"#));
    assert!(language.contains(r#"<input type="hidden" name="3f2a9c" value="1">"#));
    assert!(language.contains(r#"<select name="jform[language]" id="jform_language""#));
    assert!(language.contains(r#"<option value="de-DE" selected>Deutsch (Deutschland)</option>"#));
    assert!(language.contains(r#"<option value="en-GB">English (United Kingdom)</option>"#));
}

#[test]
fn setup_form_has_three_steps_with_only_the_first_active() {
    let html = render(&SetupForm::default());
    let setup = form_html(&html, "adminForm");

    assert!(setup.contains(r#"<fieldset id="installStep1" class="j-install-step active">"#));
    assert!(setup.contains(r#"<fieldset id="installStep2" class="j-install-step">"#));
    assert!(setup.contains(r#"<fieldset id="installStep3" class="j-install-step">"#));
    assert!(setup.contains(r#"<span class="fa fa-lock" aria-hidden="true"></span> Login Data"#));
    assert!(setup.contains(
        r#"<span class="fa fa-database" aria-hidden="true"></span> Database Configuration"#
    ));
    assert!(setup.contains(r#"id="step1">Setup Login Data <span class="fa fa-chevron-right""#));
    assert!(setup.contains(r#"id="setupButton">Install Joomla "#));
    assert!(setup.contains(r#"<input type="hidden" name="admin_password2" id="jform_admin_password2">"#));
    assert!(setup.contains(r#"<input type="hidden" name="3f2a9c" value="1">"#));
}

#[test]
fn fields_echo_values_but_never_passwords() {
    let form = SetupForm {
        site_name: "Tom & Jerry's <site>".to_string(),
        admin_email: "admin@example.org".to_string(),
        db_name: "cms".to_string(),
        ..SetupForm::default()
    };
    let html = render(&form);

    assert!(html.contains(
        r#"<input type="text" name="jform[site_name]" id="jform_site_name" value="Tom &amp; Jerry's &lt;site&gt;""#
    ));
    assert!(html.contains(r#"<input type="email" name="jform[admin_email]" id="jform_admin_email" value="admin@example.org""#));
    assert!(html.contains(r#"<input type="password" name="jform[admin_password]" id="jform_admin_password" value="" class="form-control required" autocomplete="off" required>"#));
    assert!(html.contains(r#"<input type="password" name="jform[db_pass]" id="jform_db_pass" value="" class="form-control" autocomplete="off">"#));
    assert!(html.contains(r#"id="jform_db_host" value="localhost""#));
    assert!(html.contains(r#"<option value="mysqli" selected>MySQLi</option>"#));
}

#[test]
fn required_fields_carry_the_star_and_optional_ones_do_not() {
    let html = render(&SetupForm::default());

    assert!(html.contains(
        r#"<label id="jform_site_name-lbl" for="jform_site_name" class="required">Site Name<span class="star">&#160;*</span></label>"#
    ));
    assert!(html.contains(
        r#"<label id="jform_db_pass-lbl" for="jform_db_pass">Password</label>"#
    ));
    assert!(!html.contains("jform_db_old-lbl"));
}

#[test]
fn old_database_choice_checks_the_selected_action() {
    let form = SetupForm {
        db_old: OldDatabaseAction::Remove,
        ..SetupForm::default()
    };
    let html = render(&form);

    assert!(html.contains(r#"<fieldset id="jform_db_old" class="radio btn-group">"#));
    assert!(html.contains(
        r#"<input type="radio" id="jform_db_old0" name="jform[db_old]" value="backup"><label for="jform_db_old0">Backup</label>"#
    ));
    assert!(html.contains(
        r#"<input type="radio" id="jform_db_old1" name="jform[db_old]" value="remove" checked><label for="jform_db_old1">Remove</label>"#
    ));
}
