//! Installation wizard setup page.
//!
//! # Responsibility
//! - Render the step menu, the language switch form and the three setup
//!   fieldsets (site, login data, database) from a `SetupForm`.
//!
//! # Invariants
//! - Password inputs never echo a value.
//! - The language form always posts `task=language.set` with `format=json`.
//! - Every field is named `jform[<name>]` with element id `jform_<name>`.

use crate::collab::Translator;
use crate::html::{Element, Markup};

pub const LANGUAGE_TASK: &str = "language.set";

/// One `<option>` of a setup select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// What the installer does with tables left by an earlier install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OldDatabaseAction {
    #[default]
    Backup,
    Remove,
}

impl OldDatabaseAction {
    pub const ALL: [Self; 2] = [Self::Backup, Self::Remove];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Remove => "remove",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "backup" => Some(Self::Backup),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    fn language_key(self) -> &'static str {
        match self {
            Self::Backup => "INSTL_DATABASE_FIELD_VALUE_BACKUP",
            Self::Remove => "INSTL_DATABASE_FIELD_VALUE_REMOVE",
        }
    }
}

/// Values shown in the setup page. Passwords are not part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub language: String,
    pub languages: Vec<SelectOption>,
    pub site_name: String,
    pub admin_user: String,
    pub admin_username: String,
    pub admin_email: String,
    pub db_type: String,
    pub db_types: Vec<SelectOption>,
    pub db_host: String,
    pub db_user: String,
    pub db_name: String,
    pub db_prefix: String,
    pub db_old: OldDatabaseAction,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            language: "en-GB".to_string(),
            languages: vec![SelectOption::new("en-GB", "English (United Kingdom)")],
            site_name: String::new(),
            admin_user: String::new(),
            admin_username: String::new(),
            admin_email: String::new(),
            db_type: "mysqli".to_string(),
            db_types: vec![
                SelectOption::new("mysqli", "MySQLi"),
                SelectOption::new("mysql", "MySQL (PDO)"),
                SelectOption::new("pgsql", "PostgreSQL (PDO)"),
            ],
            db_host: "localhost".to_string(),
            db_user: String::new(),
            db_name: String::new(),
            db_prefix: "jos_".to_string(),
            db_old: OldDatabaseAction::default(),
        }
    }
}

enum Control<'f> {
    Text(&'f str),
    Email(&'f str),
    Password,
    Select(&'f [SelectOption], &'f str),
    Radio(OldDatabaseAction),
}

struct Field<'f> {
    name: &'static str,
    /// `None` renders the control without a label.
    label: Option<&'static str>,
    required: bool,
    control: Control<'f>,
}

impl<'f> Field<'f> {
    fn new(name: &'static str, label: &'static str, control: Control<'f>) -> Self {
        Self {
            name,
            label: Some(label),
            required: true,
            control,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn unlabeled(mut self) -> Self {
        self.label = None;
        self
    }
}

const STEPS: &[(&str, Option<&str>)] = &[
    ("INSTL_STEP_LANGUAGE", Some("INSTL_SELECT_INSTALL_LANG")),
    ("INSTL_STEP_SITE", Some("INSTL_SETUP_SITE_NAME")),
    ("INSTL_STEP_DATABASE", None),
    ("INSTL_STEP_INSTALLING", None),
    ("INSTL_STEP_FINALISE", None),
];

/// Renders the installation wizard setup page.
pub struct SetupView<'a> {
    translator: &'a dyn Translator,
}

impl<'a> SetupView<'a> {
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self { translator }
    }

    /// Renders the page; `token` names the anti-forgery field of both forms.
    pub fn render(&self, form: &SetupForm, token: &str) -> Markup {
        let forms = Element::new("div")
            .attr("class", "col")
            .child(&self.language_form(form, token))
            .child(&self.setup_form(form, token));

        let row = Element::new("div")
            .attr("class", "row no-gutters")
            .child_element(
                Element::new("div")
                    .attr("class", "col-auto")
                    .child(&self.step_menu()),
            )
            .child_element(forms);

        Element::new("div")
            .attr("id", "installer-view")
            .attr("data-page-name", "setup")
            .child_element(row)
            .render()
    }

    fn step_menu(&self) -> Markup {
        let items: Markup = STEPS
            .iter()
            .enumerate()
            .map(|(position, (label, title))| {
                let button = Element::new("button")
                    .attr_opt("class", (position == 0).then_some("active"))
                    .attr_opt("title", title.map(|key| self.translator.translate(key)))
                    .text(&self.translator.translate(label));
                Element::new("li").child_element(button).render()
            })
            .collect();

        Element::new("ul")
            .attr("class", "j-install-menu")
            .child(&items)
            .render()
    }

    fn language_form(&self, form: &SetupForm, token: &str) -> Markup {
        let language = Field::new(
            "language",
            "INSTL_SELECT_LANGUAGE_TITLE",
            Control::Select(&form.languages, &form.language),
        );

        let mut body = self.field_group(&language);
        body.push(&hidden("task", LANGUAGE_TASK));
        body.push(&hidden("format", "json"));
        body.push(&hidden(token, "1"));

        Element::new("form")
            .attr("action", "index.php")
            .attr("method", "post")
            .attr("id", "languageForm")
            .attr("class", "lang-select j-install-form")
            .child_element(
                Element::new("fieldset")
                    .attr("class", "j-install-step active")
                    .child_element(
                        Element::new("div")
                            .attr("class", "j-install-step-form")
                            .child(&body),
                    ),
            )
            .render()
    }

    fn setup_form(&self, form: &SetupForm, token: &str) -> Markup {
        let site = [Field::new(
            "site_name",
            "INSTL_SITE_NAME_LABEL",
            Control::Text(&form.site_name),
        )];
        let login = [
            Field::new(
                "admin_user",
                "INSTL_ADMIN_USER_LABEL",
                Control::Text(&form.admin_user),
            ),
            Field::new(
                "admin_username",
                "INSTL_ADMIN_USERNAME_LABEL",
                Control::Text(&form.admin_username),
            ),
            Field::new(
                "admin_password",
                "INSTL_ADMIN_PASSWORD_LABEL",
                Control::Password,
            ),
            Field::new(
                "admin_email",
                "INSTL_ADMIN_EMAIL_LABEL",
                Control::Email(&form.admin_email),
            ),
        ];
        let database = [
            Field::new(
                "db_type",
                "INSTL_DATABASE_TYPE_LABEL",
                Control::Select(&form.db_types, &form.db_type),
            ),
            Field::new(
                "db_host",
                "INSTL_DATABASE_HOST_LABEL",
                Control::Text(&form.db_host),
            ),
            Field::new(
                "db_user",
                "INSTL_DATABASE_USER_LABEL",
                Control::Text(&form.db_user),
            ),
            Field::new("db_pass", "INSTL_DATABASE_PASSWORD_LABEL", Control::Password).optional(),
            Field::new(
                "db_name",
                "INSTL_DATABASE_NAME_LABEL",
                Control::Text(&form.db_name),
            ),
            Field::new(
                "db_prefix",
                "INSTL_DATABASE_PREFIX_LABEL",
                Control::Text(&form.db_prefix),
            ),
            Field::new(
                "db_old",
                "INSTL_DATABASE_OLD_PROCESS_LABEL",
                Control::Radio(form.db_old),
            )
            .unlabeled(),
        ];

        let mut steps = self.step(1, None, &site, "step1", "INSTL_SETUP_LOGIN_DATA");
        steps.push(&self.step(
            2,
            Some(("fa fa-lock", "INSTL_LOGIN_DATA")),
            &login,
            "step2",
            "INSTL_CONNECT_DB",
        ));
        steps.push(&self.step(
            3,
            Some(("fa fa-database", "INSTL_DATABASE")),
            &database,
            "setupButton",
            "INSTL_INSTALL_JOOMLA",
        ));
        steps.push(
            &Element::new("input")
                .attr("type", "hidden")
                .attr("name", "admin_password2")
                .attr("id", "jform_admin_password2")
                .render(),
        );
        steps.push(&hidden(token, "1"));

        Element::new("form")
            .attr("action", "index.php")
            .attr("method", "post")
            .attr("id", "adminForm")
            .attr("class", "form-validate j-install-form")
            .child(&steps)
            .render()
    }

    /// One wizard fieldset; only the first step starts active.
    fn step(
        &self,
        number: u8,
        legend: Option<(&str, &str)>,
        fields: &[Field<'_>],
        button_id: &'static str,
        button_label: &str,
    ) -> Markup {
        let mut body: Markup = fields.iter().map(|field| self.field_group(field)).collect();
        let button = Element::new("button")
            .attr("class", "btn btn-primary btn-block")
            .attr("id", button_id)
            .text(&self.translator.translate(button_label))
            .text(" ")
            .child_element(
                Element::new("span")
                    .attr("class", "fa fa-chevron-right")
                    .attr("aria-hidden", "true"),
            );
        body.push(
            &Element::new("div")
                .attr("class", "form-group")
                .child_element(button)
                .render(),
        );

        let mut fieldset = Element::new("fieldset")
            .attr("id", format!("installStep{number}"))
            .attr(
                "class",
                if number == 1 {
                    "j-install-step active"
                } else {
                    "j-install-step"
                },
            );
        if let Some((icon, title)) = legend {
            fieldset = fieldset.child_element(
                Element::new("legend")
                    .attr("class", "j-install-step-header")
                    .child_element(
                        Element::new("span")
                            .attr("class", icon.to_string())
                            .attr("aria-hidden", "true"),
                    )
                    .text(" ")
                    .text(&self.translator.translate(title)),
            );
        }
        fieldset
            .child_element(
                Element::new("div")
                    .attr("class", "j-install-step-form")
                    .child(&body),
            )
            .render()
    }

    fn field_group(&self, field: &Field<'_>) -> Markup {
        let id = format!("jform_{}", field.name);
        let mut group = Markup::new();

        if let Some(label) = field.label {
            let mut element = Element::new("label")
                .attr("id", format!("{id}-lbl"))
                .attr("for", id.as_str())
                .attr_opt("class", field.required.then_some("required"))
                .text(&self.translator.translate(label));
            if field.required {
                element = element.child_element(
                    Element::new("span")
                        .attr("class", "star")
                        .child(&Markup::raw("&#160;*")),
                );
            }
            group.push(&element.render());
        }
        group.push(&self.control(field, &id));

        Element::new("div")
            .attr("class", "form-group")
            .child(&group)
            .render()
    }

    fn control(&self, field: &Field<'_>, id: &str) -> Markup {
        let name = format!("jform[{}]", field.name);
        let input_class = if field.required {
            "form-control required"
        } else {
            "form-control"
        };

        match &field.control {
            Control::Text(value) | Control::Email(value) => {
                let kind = if matches!(field.control, Control::Email(_)) {
                    "email"
                } else {
                    "text"
                };
                Element::new("input")
                    .attr("type", kind)
                    .attr("name", name)
                    .attr("id", id)
                    .attr("value", *value)
                    .attr("class", input_class)
                    .flag("required", field.required)
                    .render()
            }
            Control::Password => Element::new("input")
                .attr("type", "password")
                .attr("name", name)
                .attr("id", id)
                .attr("value", "")
                .attr("class", input_class)
                .attr("autocomplete", "off")
                .flag("required", field.required)
                .render(),
            Control::Select(options, selected) => {
                let options: Markup = options
                    .iter()
                    .map(|option| {
                        Element::new("option")
                            .attr("value", option.value.as_str())
                            .flag("selected", option.value == *selected)
                            .text(&option.label)
                            .render()
                    })
                    .collect();
                Element::new("select")
                    .attr("name", name)
                    .attr("id", id)
                    .attr("class", "custom-select")
                    .flag("required", field.required)
                    .child(&options)
                    .render()
            }
            Control::Radio(current) => {
                let choices: Markup = OldDatabaseAction::ALL
                    .iter()
                    .enumerate()
                    .map(|(position, action)| {
                        let choice_id = format!("{id}{position}");
                        let mut html = Element::new("input")
                            .attr("type", "radio")
                            .attr("id", choice_id.as_str())
                            .attr("name", name.as_str())
                            .attr("value", action.as_str())
                            .flag("checked", action == current)
                            .render();
                        html.push(
                            &Element::new("label")
                                .attr("for", choice_id.as_str())
                                .text(&self.translator.translate(action.language_key()))
                                .render(),
                        );
                        html
                    })
                    .collect();
                Element::new("fieldset")
                    .attr("id", id)
                    .attr("class", "radio btn-group")
                    .child(&choices)
                    .render()
            }
        }
    }
}

fn hidden(name: &str, value: &str) -> Markup {
    Element::new("input")
        .attr("type", "hidden")
        .attr("name", name)
        .attr("value", value)
        .render()
}

#[cfg(test)]
mod tests {
    use super::OldDatabaseAction;

    #[test]
    fn old_database_action_round_trips_known_values() {
        assert_eq!(OldDatabaseAction::parse(" remove "), Some(OldDatabaseAction::Remove));
        assert_eq!(OldDatabaseAction::parse("backup"), Some(OldDatabaseAction::Backup));
        assert_eq!(OldDatabaseAction::parse("drop"), None);
        assert_eq!(OldDatabaseAction::default().as_str(), "backup");
    }
}
