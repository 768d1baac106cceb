use maud::{Markup, Render, html};

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h3 class="text-xl font-semibold mb-4" {(s)}
    }
}

pub fn render_table<const N: usize>(titles: [&'static str; N], items: Vec<[Markup; N]>) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody {
                    @if items.is_empty() {
                        tr {
                            td colspan=(N) class="py-2 px-4 text-gray-400 italic" {"Nothing to show"}
                        }
                    }
                    @for row in items {
                        tr {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn form_element(id: &'static str, label: &'static str, inner: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-medium text-gray-400 mb-2" {(label)}
            (inner)
        }
    }
}

pub fn simple_form_element(
    name: &'static str,
    label: &'static str,
    required: bool,
    input_type: Option<&'static str>,
    placeholder: Option<&'static str>,
) -> Markup {
    form_element(name, label, html! {
        input type=(input_type.unwrap_or("text")) name=(name) id=(name) required[required] placeholder=[placeholder] class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
    })
}

pub fn form_submit_button(text: Option<&'static str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn errors_list(
    heading: Option<&'static str>,
    errors: impl IntoIterator<Item = impl Render>,
) -> Markup {
    html! {
        div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
            @if let Some(heading) = heading {
                strong class="font-bold" {(heading)}
            }
            ul class="list-disc list-inside" {
                @for error in errors {
                    li {(error)}
                }
            }
        }
    }
}
