use crate::adapters::export::{ExportReport, PlanExporter};
use crate::app::display::{self, Palette};
use crate::app::questionnaire::{ask_enum, ask_enum_set, ask_yes_no};
use crate::core::assembler::PlanAssembler;
use crate::core::{Questionnaire, Storage};
use crate::domain::model::{
    Allergen, CustomerPreferences, CustomerProfile, DietType, Gender, MealFrequency, MealPlan,
    Objective,
};
use crate::domain::ports::PlanReport;
use crate::utils::error::{ErrorCategory, PlannerError, Result};
use chrono::{Days, NaiveDate};
use rand::Rng;

const DURATIONS: [(&str, u64); 3] = [("1 week", 7), ("2 weeks", 14), ("4 weeks", 28)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preference {
    Objective,
    MealType,
    Duration,
    Frequency,
    Allergies,
    AddOns,
}

impl Preference {
    const ALL: [(Preference, &'static str); 6] = [
        (Preference::Objective, "Objective"),
        (Preference::MealType, "Meal Type"),
        (Preference::Duration, "Duration"),
        (Preference::Frequency, "Frequency"),
        (Preference::Allergies, "Allergies"),
        (Preference::AddOns, "Add-ons"),
    ];
}

/// 問卷過程中尚未確認的偏好
#[derive(Debug, Clone)]
struct PreferenceDraft {
    objective: Objective,
    diet_type: DietType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: MealFrequency,
    allergens: Vec<Allergen>,
}

impl PreferenceDraft {
    fn confirm(&self) -> Result<CustomerPreferences> {
        CustomerPreferences::new(
            self.diet_type,
            self.objective,
            self.frequency,
            self.allergens.iter().copied(),
            self.start_date,
            self.end_date,
        )
    }
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// 未滿 18 歲，不提供服務
    Underage,
    /// 無法產生計畫且使用者放棄重試
    NoPlan,
    Completed {
        profile: CustomerProfile,
        preferences: CustomerPreferences,
        plan: MealPlan,
        exports: ExportReport,
    },
}

pub struct Session<'a, Q: Questionnaire, S: Storage, R: Rng> {
    questionnaire: Q,
    assembler: &'a PlanAssembler,
    exporter: PlanExporter<S>,
    palette: Palette,
    rng: R,
}

impl<'a, Q: Questionnaire, S: Storage, R: Rng> Session<'a, Q, S, R> {
    pub fn new(
        questionnaire: Q,
        assembler: &'a PlanAssembler,
        exporter: PlanExporter<S>,
        palette: Palette,
        rng: R,
    ) -> Self {
        Self {
            questionnaire,
            assembler,
            exporter,
            palette,
            rng,
        }
    }

    pub fn into_questionnaire(self) -> Q {
        self.questionnaire
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        self.questionnaire.say("Welcome to the Meal Plan Generator")?;

        let profile = match self.ask_profile()? {
            Some(profile) => profile,
            None => return Ok(SessionOutcome::Underage),
        };
        tracing::debug!("Profile collected: age {}, {}", profile.age, profile.gender);

        let mut draft = self.ask_all_questions()?;
        self.confirm_preferences(&mut draft)?;

        let (preferences, plan) = loop {
            let preferences = draft.confirm()?;
            match self.assembler.assemble(&preferences, &mut self.rng) {
                Ok(plan) => break (preferences, plan),
                Err(e) if e.category() == ErrorCategory::Constraint => {
                    tracing::warn!("Plan assembly failed: {}", e);
                    let message = self.palette.fail(&format!("ERROR: {}", e.user_friendly_message()));
                    self.questionnaire.say(&message)?;
                    if !ask_yes_no(
                        &mut self.questionnaire,
                        "Would you like to change your preferences and try again?",
                    )? {
                        return Ok(SessionOutcome::NoPlan);
                    }
                    self.modify_preferences(&mut draft)?;
                }
                Err(e) => return Err(e),
            }
        };

        let rendered = display::render_plan(&self.palette, &preferences, &plan);
        self.questionnaire.say(&rendered)?;
        if let Some(warnings) = display::render_warnings(&self.palette, &plan) {
            self.questionnaire.say(&warnings)?;
        }

        let report = PlanReport {
            profile: &profile,
            preferences: &preferences,
            plan: &plan,
        };
        let mut exports = self.exporter.export_tables(&report);
        self.report_exports(&exports)?;

        if ask_yes_no(
            &mut self.questionnaire,
            "Would you like to generate a PDF document for your meal plan?",
        )? {
            self.questionnaire.say("Generating PDF document...")?;
            let document = self.exporter.export_document(&report);
            self.report_exports(&document)?;
            exports.written.extend(document.written);
            exports.failures.extend(document.failures);
        }

        self.questionnaire.say("Thank you for using the Meal Plan Generator")?;

        Ok(SessionOutcome::Completed {
            profile,
            preferences,
            plan,
            exports,
        })
    }

    fn ask_profile(&mut self) -> Result<Option<CustomerProfile>> {
        let name = self.questionnaire.ask_text("What is your name?")?;
        let greeting = format!("Hello, {}!", self.palette.name(&name));
        self.questionnaire.say(&greeting)?;

        let age = self.questionnaire.ask_number("How old are you?")?;
        if age < CustomerProfile::MINIMUM_AGE {
            let message = self
                .palette
                .fail("Sorry, you must be 18 years or older to use this service.");
            self.questionnaire.say(&message)?;
            return Ok(None);
        }

        let gender: Gender = ask_enum(&mut self.questionnaire, "What is your gender?")?;
        Ok(Some(CustomerProfile { name, age, gender }))
    }

    fn ask_all_questions(&mut self) -> Result<PreferenceDraft> {
        let objective = ask_enum(&mut self.questionnaire, "What is your weight objective?")?;
        let diet_type = ask_enum(&mut self.questionnaire, "What type of meal plan would you like?")?;
        let (start_date, end_date) = self.ask_duration()?;
        let frequency = self.ask_frequency()?;
        let allergens = self.ask_allergies()?;
        self.ask_add_ons()?;

        Ok(PreferenceDraft {
            objective,
            diet_type,
            start_date,
            end_date,
            frequency,
            allergens,
        })
    }

    fn ask_duration(&mut self) -> Result<(NaiveDate, NaiveDate)> {
        let start_date = self
            .questionnaire
            .ask_date("When would you like to start?", true)?;
        let message = format!("Starting date: {}", self.palette.ok(&display::long_date(start_date)));
        self.questionnaire.say(&message)?;

        let labels: Vec<String> = DURATIONS.iter().map(|(label, _)| label.to_string()).collect();
        let index = self
            .questionnaire
            .ask_choice("How long would you like to subscribe?", &labels)?;
        let end_date = start_date
            .checked_add_days(Days::new(DURATIONS[index].1))
            .ok_or_else(|| PlannerError::InvalidPreferences {
                message: format!("cannot add {} to {}", DURATIONS[index].0, start_date),
            })?;

        let message = format!("Ending date: {}", self.palette.ok(&display::long_date(end_date)));
        self.questionnaire.say(&message)?;
        Ok((start_date, end_date))
    }

    fn ask_frequency(&mut self) -> Result<MealFrequency> {
        ask_enum(
            &mut self.questionnaire,
            "How many meals would you like to have per day?",
        )
    }

    fn ask_allergies(&mut self) -> Result<Vec<Allergen>> {
        ask_enum_set(&mut self.questionnaire, "Do you have any allergies?")
    }

    fn ask_add_ons(&mut self) -> Result<()> {
        let message = self
            .palette
            .muted("Add ons is not yet available. Stay tuned for updates!");
        self.questionnaire.say(&message)
    }

    fn ask_single(&mut self, preference: Preference, draft: &mut PreferenceDraft) -> Result<()> {
        match preference {
            Preference::Objective => {
                draft.objective = ask_enum(&mut self.questionnaire, "What is your weight objective?")?
            }
            Preference::MealType => {
                draft.diet_type =
                    ask_enum(&mut self.questionnaire, "What type of meal plan would you like?")?
            }
            Preference::Duration => {
                let (start_date, end_date) = self.ask_duration()?;
                draft.start_date = start_date;
                draft.end_date = end_date;
            }
            Preference::Frequency => draft.frequency = self.ask_frequency()?,
            Preference::Allergies => draft.allergens = self.ask_allergies()?,
            Preference::AddOns => self.ask_add_ons()?,
        }
        Ok(())
    }

    fn print_preferences(&mut self, draft: &PreferenceDraft) -> Result<()> {
        let preferences = draft.confirm()?;
        let summary = display::render_preferences(&self.palette, &preferences);
        self.questionnaire.say(&summary)
    }

    /// 顯示摘要並詢問是否修改
    fn confirm_preferences(&mut self, draft: &mut PreferenceDraft) -> Result<()> {
        self.print_preferences(draft)?;
        if ask_yes_no(
            &mut self.questionnaire,
            "Would you like to modify your preferences?",
        )? {
            self.modify_preferences(draft)?;
        }
        Ok(())
    }

    fn modify_preferences(&mut self, draft: &mut PreferenceDraft) -> Result<()> {
        let labels: Vec<String> = Preference::ALL
            .iter()
            .map(|(_, label)| label.to_string())
            .collect();

        loop {
            let index = self
                .questionnaire
                .ask_choice("Which preference would you like to modify?", &labels)?;
            self.ask_single(Preference::ALL[index].0, draft)?;
            self.print_preferences(draft)?;

            if !ask_yes_no(
                &mut self.questionnaire,
                "Would you like to modify another preference?",
            )? {
                return Ok(());
            }
        }
    }

    fn report_exports(&mut self, exports: &ExportReport) -> Result<()> {
        for path in &exports.written {
            let message = self.palette.ok(&format!("Meal plan saved to {}", path));
            self.questionnaire.say(&message)?;
        }
        for failure in &exports.failures {
            let message = self.palette.fail(&format!(
                "{} ({})",
                failure.user_friendly_message(),
                failure.recovery_suggestion()
            ));
            self.questionnaire.say(&message)?;
        }
        Ok(())
    }
}
