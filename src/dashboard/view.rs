//! Markup for the dashboard: the totals, the add forms and the record tables.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    dashboard::{handlers::AddRecordError, totals::DashboardTotals},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        amount_input, base, format_amount, link, mode_select, text_input,
    },
    navigation::NavBar,
    record::{Record, RecordForm, RecordKind},
};

const TABLE_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

const CARD_STYLE: &str = "p-4 bg-white rounded-lg shadow dark:bg-gray-800";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-semibold";

pub(super) fn dashboard_view(
    totals: &DashboardTotals,
    collections: &[Record],
    expenses: &[Record],
    is_admin: bool,
    add_error: Option<&AddRecordError>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT, is_admin).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (totals_view(totals))

            @if is_admin {
                section class="grid w-full max-w-screen-xl grid-cols-1 gap-4 my-8 md:grid-cols-2"
                {
                    (add_record_form(RecordKind::Collection, add_error))
                    (add_record_form(RecordKind::Expense, add_error))
                }
            } @else {
                p class="my-6" { (link(endpoints::LOG_IN, "Log in")) " to add or change records." }
            }

            (records_table(RecordKind::Collection, collections, is_admin))
            (records_table(RecordKind::Expense, expenses, is_admin))
        }
    };

    base("Dashboard", &content)
}

fn total_card(id: &str, label: &str, amount: f64) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            dt class=(CARD_LABEL_STYLE) { (label) }
            dd id=(id) class=(CARD_VALUE_STYLE) { (format_amount(amount)) }
        }
    }
}

fn totals_view(totals: &DashboardTotals) -> Markup {
    html! {
        section class="w-full max-w-screen-xl space-y-4"
        {
            h2 class="text-xl font-bold" { "All time" }
            dl class="grid grid-cols-2 gap-4 md:grid-cols-4"
            {
                (total_card("total-cash", "Cash collected", totals.total_cash))
                (total_card("total-online", "Online collected", totals.total_online))
                (total_card("total-expense", "Expenses", totals.total_expense))
                (total_card("net", "Net", totals.net))
            }

            h2 class="text-xl font-bold" { "Today" }
            dl class="grid grid-cols-2 gap-4 md:grid-cols-4"
            {
                (total_card("today-cash", "Cash collected", totals.today_cash))
                (total_card("today-online", "Online collected", totals.today_online))
                (total_card("today-total", "Total collected", totals.today_total))
                (total_card("today-expense", "Expenses", totals.today_expense))
            }
        }
    }
}

fn add_record_form(kind: RecordKind, add_error: Option<&AddRecordError>) -> Markup {
    let endpoint = match kind {
        RecordKind::Collection => endpoints::ADD_COLLECTION,
        RecordKind::Expense => endpoints::ADD_EXPENSE,
    };
    // Only the form that was submitted gets its values and message back.
    let add_error = add_error.filter(|error| error.kind == kind);
    let empty_form = RecordForm::default();
    let form = add_error.map_or(&empty_form, |error| &error.form);
    let id = |field: &str| format!("{kind}-{field}");

    html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="mb-4 text-xl font-bold" { "Add " (kind.title()) }

            form
                id={ "add-" (kind.as_str()) "-form" }
                method="post"
                action=(endpoint)
                class="w-full space-y-4"
            {
                (text_input(&id("name"), "name", "Name", "text", &form.name))
                (amount_input(&id("amount"), form.amount.as_deref().unwrap_or_default()))
                (mode_select(&id("mode"), &form.mode))

                @if let Some(add_error) = add_error {
                    p class={ "form-error " (FORM_ERROR_STYLE) } { (add_error.message) }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add " (kind.title()) }
            }
        }
    }
}

fn records_table(kind: RecordKind, records: &[Record], is_admin: bool) -> Markup {
    let section_id = match kind {
        RecordKind::Collection => "collections",
        RecordKind::Expense => "expenses",
    };
    let heading = match kind {
        RecordKind::Collection => "Collections",
        RecordKind::Expense => "Expenses",
    };

    html! {
        section id=(section_id) class="w-full max-w-screen-xl my-6"
        {
            h2 class="mb-4 text-xl font-bold" { (heading) }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Mode" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            @if is_admin {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }
                    }

                    tbody
                    {
                        @for record in records {
                            (record_row(kind, record, is_admin))
                        }
                    }
                }
            }

            @if records.is_empty() {
                p class="mt-2 text-center text-gray-500" { "Nothing recorded yet." }
            }
        }
    }
}

fn record_row(kind: RecordKind, record: &Record, is_admin: bool) -> Markup {
    let date = record
        .date
        .format(TABLE_DATE_FORMAT)
        .unwrap_or_else(|_| record.date.to_string());

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (record.name) }
            td class=(TABLE_CELL_STYLE) { (format_amount(record.amount)) }
            td class=(TABLE_CELL_STYLE) { (record.mode) }
            td class=(TABLE_CELL_STYLE) { (date) }
            @if is_admin {
                td class={ (TABLE_CELL_STYLE) " space-x-4" }
                {
                    a href=(format_endpoint(endpoints::EDIT_RECORD, &[&kind, &record.id]))
                        class=(LINK_STYLE)
                    {
                        "Edit"
                    }
                    a href=(format_endpoint(endpoints::DELETE_RECORD, &[&kind, &record.id]))
                        class=(BUTTON_DELETE_STYLE)
                        onclick="return confirm('Delete this record?');"
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}
