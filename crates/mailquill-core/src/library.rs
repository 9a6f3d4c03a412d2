//! Prebuilt template library.
//!
//! A static set of ready-to-import templates, grouped by category. Importing
//! merges by name - a library entry whose name already exists in the user's
//! collection is skipped, never overwritten.

/// Library category groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryCategory {
    Work,
    Support,
    Sales,
    Personal,
    Signature,
    FollowUp,
}

impl LibraryCategory {
    /// Every category, in display order.
    pub fn all() -> [LibraryCategory; 6] {
        [
            LibraryCategory::Work,
            LibraryCategory::Support,
            LibraryCategory::Sales,
            LibraryCategory::Personal,
            LibraryCategory::Signature,
            LibraryCategory::FollowUp,
        ]
    }
}

/// What to import from the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibrarySelection {
    All,
    Category(LibraryCategory),
}

/// A single prebuilt template.
#[derive(Debug, Clone, Copy)]
pub struct LibraryTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

/// Entries for one category.
pub fn library_templates(category: LibraryCategory) -> &'static [LibraryTemplate] {
    match category {
        LibraryCategory::Work => WORK,
        LibraryCategory::Support => SUPPORT,
        LibraryCategory::Sales => SALES,
        LibraryCategory::Personal => PERSONAL,
        LibraryCategory::Signature => SIGNATURE,
        LibraryCategory::FollowUp => FOLLOW_UP,
    }
}

/// Entries matching a selection.
pub fn selection_templates(selection: LibrarySelection) -> Vec<&'static LibraryTemplate> {
    match selection {
        LibrarySelection::All => LibraryCategory::all()
            .iter()
            .flat_map(|c| library_templates(*c))
            .collect(),
        LibrarySelection::Category(category) => library_templates(category).iter().collect(),
    }
}

/// How many library entries a selection covers.
pub fn prebuilt_count(selection: LibrarySelection) -> usize {
    selection_templates(selection).len()
}

const WORK: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "Meeting Follow-up",
        category: "Work",
        subject: "Re: Meeting with {{name}}",
        body: "Hi {{name}},\n\nThank you for taking the time to meet with me today. I really enjoyed our discussion about {{topic}}.\n\nAs we discussed, the next steps are:\n- {{next_step_1}}\n- {{next_step_2}}\n\nI'll follow up with you by {{follow_up_date}} to check on progress.\n\nPlease let me know if you have any questions in the meantime.\n\nBest regards,\n{{your_name}}",
    },
    LibraryTemplate {
        name: "Project Update",
        category: "Work",
        subject: "{{project_name}} - Status Update",
        body: "Hi {{recipient_name}},\n\nI wanted to give you a quick update on {{project_name}}.\n\nCurrent status: {{status}}\n\nCompleted this week:\n- {{accomplishment_1}}\n- {{accomplishment_2}}\n\nNext week's goals:\n- {{goal_1}}\n- {{goal_2}}\n\nTimeline: {{timeline}}\n\nLet me know if you have any questions or concerns.\n\nBest regards,\n{{your_name}}",
    },
    LibraryTemplate {
        name: "Out of Office",
        category: "Work",
        subject: "Out of Office: {{your_name}}",
        body: "Thank you for your email.\n\nI am currently out of the office from {{start_date}} to {{end_date}} with limited access to email.\n\nIf you need immediate assistance, please contact:\n{{backup_contact}} at {{backup_email}}\n\nI will respond to your message when I return on {{return_date}}.\n\nBest regards,\n{{your_name}}",
    },
];

const SUPPORT: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "Issue Acknowledgment",
        category: "Support",
        subject: "Re: {{issue_type}} - Ticket #{{ticket_number}}",
        body: "Hi {{customer_name}},\n\nThank you for contacting us about {{issue_type}}.\n\nI've received your request and created ticket #{{ticket_number}} to track this issue.\n\nI understand that {{issue_summary}}, and I'm here to help resolve this as quickly as possible.\n\nI'm currently investigating and will update you within {{timeframe}} with either a solution or next steps.\n\nIf you have any additional information that might help, please reply to this email.\n\nBest regards,\n{{support_name}}\n{{company_name}} Support Team",
    },
    LibraryTemplate {
        name: "Issue Resolved",
        category: "Support",
        subject: "Resolved: {{issue_type}} - Ticket #{{ticket_number}}",
        body: "Hi {{customer_name}},\n\nGreat news! I've resolved the issue with {{issue_type}}.\n\nWhat was done:\n{{resolution}}\n\nYou should now be able to {{expected_outcome}}.\n\nI'm marking this ticket as resolved, but please don't hesitate to reach out if you experience any further issues or have questions.\n\nThank you for your patience!\n\nBest regards,\n{{support_name}}\n{{company_name}} Support Team",
    },
];

const SALES: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "Cold Outreach",
        category: "Sales",
        subject: "{{topic}} for {{company_name}}",
        body: "Hi {{name}},\n\nI hope this email finds you well.\n\nI'm reaching out because I noticed that {{company_name}} {{observation}}.\n\nWe specialize in helping companies like yours {{solution}}.\n\nOur clients typically see:\n- {{benefit_1}}\n- {{benefit_2}}\n\nWould you be open to a brief 15-minute call to discuss how we might help {{company_name}} achieve {{goal}}?\n\nI have availability {{availability}}.\n\nLooking forward to connecting,\n{{your_name}}\n{{your_title}}\n{{your_company}}",
    },
    LibraryTemplate {
        name: "Proposal Follow-up",
        category: "Sales",
        subject: "Following up: {{proposal_name}}",
        body: "Hi {{name}},\n\nI wanted to follow up on the proposal I sent on {{proposal_date}} for {{project_name}}.\n\nHave you had a chance to review it?\n\nI'm happy to answer any questions or discuss any aspects of the proposal in more detail.\n\nWould you like to schedule a call to discuss next steps?\n\nBest regards,\n{{your_name}}\n{{your_title}}\n{{your_company}}",
    },
];

const PERSONAL: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "Thank You - Personal",
        category: "Personal",
        subject: "Thank You!",
        body: "Hi {{name}},\n\nI wanted to say thank you for {{reason}}.\n\n{{personal_message}}\n\nYour {{quality}} means so much to me, and I'm grateful to have you in my life.\n\nThanks again,\n{{your_name}}",
    },
    LibraryTemplate {
        name: "Congratulations",
        category: "Personal",
        subject: "Congratulations on {{achievement}}!",
        body: "Hi {{name}},\n\nCongratulations on {{achievement}}!\n\n{{personal_message}}\n\nYou should be incredibly proud of this accomplishment. Your hard work and dedication have truly paid off.\n\nWishing you continued success,\n{{your_name}}",
    },
];

const SIGNATURE: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "Professional Signature",
        category: "Signature",
        subject: "",
        body: "Best regards,\n{{your_name}}\n{{your_title}}\n{{company_name}}\n\n{{email}}\n{{phone}}\n{{website}}",
    },
    LibraryTemplate {
        name: "Minimal Signature",
        category: "Signature",
        subject: "",
        body: "{{your_name}}\n{{email}} | {{phone}}",
    },
];

const FOLLOW_UP: &[LibraryTemplate] = &[
    LibraryTemplate {
        name: "General Follow-up",
        category: "Follow-up",
        subject: "Following up: {{topic}}",
        body: "Hi {{name}},\n\nI wanted to follow up on {{topic}} that we discussed on {{date}}.\n\n{{context}}\n\nHave you had a chance to {{action}}?\n\nPlease let me know if you need any additional information from me.\n\nBest regards,\n{{your_name}}",
    },
    LibraryTemplate {
        name: "No Response Follow-up",
        category: "Follow-up",
        subject: "Re: {{original_subject}}",
        body: "Hi {{name}},\n\nI wanted to follow up on my previous email from {{original_date}} regarding {{topic}}.\n\nI understand you're busy, but I wanted to make sure my message didn't get lost.\n\n{{brief_summary}}\n\nIs this still a priority for you? If not, no problem - just let me know so I can plan accordingly.\n\nBest regards,\n{{your_name}}",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_selection_all_covers_every_category() {
        let all = selection_templates(LibrarySelection::All);
        assert_eq!(all.len(), prebuilt_count(LibrarySelection::All));

        for category in LibraryCategory::all() {
            assert!(!library_templates(category).is_empty());
        }
    }

    #[test]
    fn test_category_selection_is_subset() {
        let work = selection_templates(LibrarySelection::Category(LibraryCategory::Work));
        assert_eq!(work.len(), prebuilt_count(LibrarySelection::Category(LibraryCategory::Work)));
        assert!(work.iter().all(|t| t.category == "Work"));
    }

    #[test]
    fn test_library_names_are_unique() {
        let all = selection_templates(LibrarySelection::All);
        let names: HashSet<&str> = all.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), all.len());
    }
}
