use crate::{
    maud_conveniences::{form_element, form_submit_button, subtitle},
    state::ChinoState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<ChinoState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-8 my-8" {
            h1 class="text-2xl font-semibold text-center" {"Chino"}

            div class="container flex flex-col space-y-4" {
                (form_element("filter", "Filter", html!{
                    input type="search" name="filter" id="filter" placeholder="Filter by any field" hx-get="/internal/get_students" hx-target="#all_students" hx-trigger="input changed delay:300ms, search" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
                }))
                div id="all_students" hx-get="/internal/get_students" hx-trigger="load" {}
                div id="in_focus" {}
            }

            div class="flex flex-row justify-center space-x-8" {
                div class="rounded shadow-xl flex flex-col p-4 bg-gray-700" {
                    div hx-get="/internal/students/new_student_form" hx-trigger="load" {}
                }

                div class="flex flex-col space-y-8" {
                    div class="rounded shadow-xl flex flex-col p-4 bg-gray-700" {
                        (subtitle("Bulk Import"))
                        p class="text-sm text-gray-400 mb-2" {
                            "CSV columns: student_id, full_name, gender, gmail, program, year_level, university"
                        }
                        form hx-put="/internal/import_students" hx-target="#in_focus" hx-encoding="multipart/form-data" {
                            label for="students_csv" class="block text-sm font-medium text-gray-400 mb-2" {"Upload Students CSV"}
                            input multiple type="file" name="students_csv" id="students_csv" accept=".csv" class="block w-full text-sm text-gray-300 file:mr-4 file:py-2 file:px-4 file:rounded file:border-0 file:text-sm file:font-semibold file:bg-violet-50 file:text-violet-700 hover:file:bg-violet-100 mb-4";
                            (form_submit_button(Some("Import Students")))
                        }
                    }

                    div class="rounded shadow-xl flex flex-col p-4 bg-gray-700 max-w-md" {
                        (subtitle("Ask about the data"))
                        div id="chat_log" class="flex flex-col space-y-2" {}
                        form hx-post="/internal/chat" hx-target="#chat_log" hx-swap="beforeend" class="flex flex-row space-x-2 items-end" {
                            input type="text" name="message" id="message" placeholder="Who studies physics?" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
                            (form_submit_button(Some("Send")))
                        }
                    }
                }
            }
        }
    })
}
