//! Templates page component.
//!
//! The catalog is mock data held in memory; uploads, copies and deletions
//! last until the page is reloaded.

use ezdoc_core::TemplateId;
use ezdoc_templates::{
    SortKey, SortOrder, Template, TemplateCatalog, TemplateQuery, UploadCandidate, format_short_date,
    format_size, upload::ACCEPT, validate_upload,
};
use leptos::prelude::*;

use crate::components::use_auth;
use crate::util::{picked_file, today};

/// Templates page.
#[component]
pub fn TemplatesPage() -> impl IntoView {
    let auth = use_auth();
    let catalog = RwSignal::new(TemplateCatalog::mock());
    let query = RwSignal::new(TemplateQuery::new());

    let page = Memo::new(move |_| catalog.with(|c| query.with(|q| q.apply(c.all()))));
    let stats = Memo::new(move |_| catalog.with(|c| c.stats(today())));

    // State for delete confirmation
    let (delete_id, set_delete_id) = signal(Option::<TemplateId>::None);

    // State for upload modal
    let (show_upload, set_show_upload) = signal(false);
    let (picked, set_picked) = signal(Option::<UploadCandidate>::None);
    let (upload_error, set_upload_error) = signal(Option::<String>::None);

    let close_upload = move || {
        set_show_upload.set(false);
        set_picked.set(None);
        set_upload_error.set(None);
    };

    let on_pick = move |ev: leptos::ev::Event| {
        let candidate = picked_file(&ev);
        let error = candidate
            .as_ref()
            .and_then(|c| validate_upload(c).err())
            .map(|report| report.current_context().to_string());
        set_upload_error.set(error);
        set_picked.set(candidate);
    };

    let on_upload = move |_| {
        let Some(candidate) = picked.get() else {
            return;
        };
        match validate_upload(&candidate) {
            Ok(upload) => {
                let author = auth
                    .profile()
                    .map(|p| p.display_name().to_string())
                    .unwrap_or_default();
                catalog.update(|c| {
                    let id = c.add_upload(upload, &author, today());
                    log::info!("uploaded template {id}");
                });
                close_upload();
            }
            Err(report) => set_upload_error.set(Some(report.current_context().to_string())),
        }
    };

    let on_delete = move |_| {
        let Some(id) = delete_id.get() else {
            return;
        };
        catalog.update(|c| {
            if let Err(report) = c.remove(id) {
                log::warn!("delete failed: {report}");
            }
        });
        set_delete_id.set(None);
    };

    let on_duplicate = move |id: TemplateId| {
        catalog.update(|c| match c.duplicate(id, today()) {
            Ok(copy) => log::info!("duplicated template {id} as {copy}"),
            Err(report) => log::warn!("duplicate failed: {report}"),
        });
    };

    view! {
        <div class="templates-page">
            <div class="page-header">
                <div>
                    <h1>"Plantillas"</h1>
                    <p>"Gestiona las plantillas de Word para generar documentos."</p>
                </div>
                <button class="primary-btn" on:click=move |_| set_show_upload.set(true)>
                    "Subir plantilla"
                </button>
            </div>

            // Statistics
            <section class="stats-grid">
                <div class="stat-card">
                    <span class="stat-label">"Total de plantillas"</span>
                    <span class="stat-value">{move || stats.get().total}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Subidas este mes"</span>
                    <span class="stat-value">{move || stats.get().uploaded_this_month}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Tamaño total"</span>
                    <span class="stat-value">{move || format_size(stats.get().total_size_bytes)}</span>
                </div>
            </section>

            // Search
            <div class="search-bar">
                <input
                    type="search"
                    placeholder="Buscar plantillas..."
                    prop:value=move || query.with(|q| q.search().to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.set_search(value));
                    }
                />
            </div>

            // Template table
            <section class="templates-list">
                {move || {
                    let rows = page.with(|p| p.rows.clone());
                    if rows.is_empty() {
                        view! {
                            <p class="empty-state">"No se encontraron plantillas."</p>
                        }.into_any()
                    } else {
                        view! {
                            <table class="templates-table">
                                <thead>
                                    <tr>
                                        <SortHeader label="Nombre" key=SortKey::Name query/>
                                        <SortHeader label="Autor" key=SortKey::Author query/>
                                        <SortHeader label="Creada" key=SortKey::Created query/>
                                        <SortHeader label="Actualizada" key=SortKey::Updated query/>
                                        <SortHeader label="Versión" key=SortKey::Version query/>
                                        <th>"Tamaño"</th>
                                        <th>"Acciones"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows.into_iter().map(|template| view! {
                                        <TemplateRow
                                            template
                                            on_duplicate
                                            on_delete=move |id| set_delete_id.set(Some(id))
                                        />
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_any()
                    }
                }}

                <div class="pagination">
                    <span class="pagination-summary">{move || page.with(|p| p.summary())}</span>
                    <button
                        class="secondary-btn"
                        disabled=move || !page.with(|p| p.has_previous())
                        on:click=move |_| {
                            let current = page.with(|p| p.page);
                            query.update(|q| q.set_page(current.saturating_sub(1)));
                        }
                    >"Anterior"</button>
                    <button
                        class="secondary-btn"
                        disabled=move || !page.with(|p| p.has_next())
                        on:click=move |_| {
                            let current = page.with(|p| p.page);
                            query.update(|q| q.set_page(current + 1));
                        }
                    >"Siguiente"</button>
                </div>
            </section>

            // Delete Confirmation Modal
            {move || delete_id.get().map(|id| {
                let name = catalog.with(|c| c.get(id).map(|t| t.name.clone())).unwrap_or_default();
                view! {
                    <div class="modal-overlay">
                        <div class="modal">
                            <h2>"¿Eliminar plantilla?"</h2>
                            <p>"Se eliminará \""{name}"\". Esta acción no se puede deshacer."</p>
                            <div class="modal-actions">
                                <button class="secondary-btn" on:click=move |_| set_delete_id.set(None)>
                                    "Cancelar"
                                </button>
                                <button class="danger-btn" on:click=on_delete>"Eliminar"</button>
                            </div>
                        </div>
                    </div>
                }
            })}

            // Upload Modal
            {move || show_upload.get().then(|| view! {
                <div class="modal-overlay">
                    <div class="modal">
                        <h2>"Subir plantilla"</h2>
                        <p>"Archivos de Word (.doc, .docx) de menos de 10MB."</p>
                        <input type="file" accept=ACCEPT on:change=on_pick/>
                        {move || picked.get().map(|c| view! {
                            <p class="picked-file">{c.file_name}" ("{format_size(c.size_bytes)}")"</p>
                        })}
                        {move || upload_error.get().map(|e| view! { <p class="error">{e}</p> })}
                        <div class="modal-actions">
                            <button class="secondary-btn" on:click=move |_| close_upload()>"Cancelar"</button>
                            <button
                                class="primary-btn"
                                disabled=move || picked.with(Option::is_none) || upload_error.with(Option::is_some)
                                on:click=on_upload
                            >"Subir"</button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

/// Column header that sorts the table when clicked.
#[component]
fn SortHeader(label: &'static str, key: SortKey, query: RwSignal<TemplateQuery>) -> impl IntoView {
    let indicator = move || {
        query.with(|q| {
            if q.sort_key() != key {
                ""
            } else if q.sort_order() == SortOrder::Ascending {
                " ▲"
            } else {
                " ▼"
            }
        })
    };

    view! {
        <th class="sortable" on:click=move |_| query.update(|q| q.toggle_sort(key))>
            {label}{indicator}
        </th>
    }
}

/// One table row with its actions.
#[component]
fn TemplateRow(
    template: Template,
    on_duplicate: impl Fn(TemplateId) + Copy + Send + Sync + 'static,
    on_delete: impl Fn(TemplateId) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let id = template.id;
    let size = template.size_label();

    view! {
        <tr>
            <td class="template-name">
                <span class="file-badge">{template.file_type.to_uppercase()}</span>
                {template.name}
            </td>
            <td>{template.author}</td>
            <td>{format_short_date(template.created_date)}</td>
            <td>{format_short_date(template.updated_date)}</td>
            <td>"v"{template.version}</td>
            <td>{size}</td>
            <td class="actions">
                <button class="icon-btn" title="Ver" on:click=move |_| log::info!("view template {id}")>"👁"</button>
                <button class="icon-btn" title="Descargar" on:click=move |_| log::info!("download template {id}")>"⬇"</button>
                <button class="icon-btn" title="Editar" on:click=move |_| log::info!("edit template {id}")>"✎"</button>
                <button class="icon-btn" title="Duplicar" on:click=move |_| on_duplicate(id)>"⧉"</button>
                <button class="icon-btn delete-btn" title="Eliminar" on:click=move |_| on_delete(id)>"🗑"</button>
            </td>
        </tr>
    }
}
