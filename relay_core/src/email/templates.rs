//! Fixed copy and the two message layouts sent for every accepted submission.

use super::OutboundEmail;
use crate::models::ContactSubmission;

pub const BUSINESS_INBOX: &str = "support@bahbeta.com";
pub const SUPPORT_EMAIL: &str = "support@bahbeta.com";
pub const SUPPORT_PHONE: &str = "+973 33283222";
pub const POSTAL_ADDRESS: &str = "BahBeta, Manama, Kingdom of Bahrain";

pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry! We will contact you within 24 hours.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const FALLBACK_MESSAGE: &str = "Email service is temporarily unavailable. Please contact us directly at support@bahbeta.com or call +973 33283222";

pub const CONFIRMATION_SUBJECT: &str = "Thank you for contacting BahBeta";

/// Message sent to the business inbox. Replies go straight to the submitter.
pub fn notification_email(submission: &ContactSubmission) -> OutboundEmail {
    let name = submission.name();
    let email = submission.email();
    let company = submission.company_or_default();
    let phone = submission.phone_or_default();
    let service = submission.service_or_default();
    let message = submission.message();

    let text = format!(
        "New Contact Form Submission\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Company: {company}\n\
         Phone: {phone}\n\
         Service of Interest: {service}\n\n\
         Message:\n\
         {message}\n"
    );

    let html = format!(
        "<h2>New Contact Form Submission</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Company:</strong> {company}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Service of Interest:</strong> {service}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>",
        line_breaks(message)
    );

    OutboundEmail {
        to: BUSINESS_INBOX.to_string(),
        reply_to: Some(email.to_string()),
        subject: format!("New Contact Form Submission from {name}"),
        text,
        html,
    }
}

/// Auto-reply to the submitter restating what they asked about.
pub fn confirmation_email(submission: &ContactSubmission) -> OutboundEmail {
    let name = submission.name();
    let service = submission.service_or_default();
    let message = submission.message();

    let text = format!(
        "Dear {name},\n\n\
         Thank you for reaching out to BahBeta. We have received your inquiry and a member of our \
         team will contact you within 24 hours.\n\n\
         Service of Interest: {service}\n\n\
         Your Message:\n\
         {message}\n\n\
         Best regards,\n\
         The BahBeta Team\n\n\
         {POSTAL_ADDRESS}\n\
         Phone: {SUPPORT_PHONE}\n\
         Email: {SUPPORT_EMAIL}\n"
    );

    let html = format!(
        "<h2>Thank you for contacting BahBeta</h2>\
         <p>Dear {name},</p>\
         <p>Thank you for reaching out to BahBeta. We have received your inquiry and a member of \
         our team will contact you within 24 hours.</p>\
         <p><strong>Service of Interest:</strong> {service}</p>\
         <p><strong>Your Message:</strong></p>\
         <p>{}</p>\
         <p>Best regards,<br>The BahBeta Team</p>\
         <hr>\
         <p>{POSTAL_ADDRESS}<br>Phone: {SUPPORT_PHONE}<br>Email: {SUPPORT_EMAIL}</p>",
        line_breaks(message)
    );

    OutboundEmail {
        to: submission.email().to_string(),
        reply_to: None,
        subject: CONFIRMATION_SUBJECT.to_string(),
        text,
        html,
    }
}

fn line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}
