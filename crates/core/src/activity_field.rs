//! Built-in catalog of business sectors and their default services.
//!
//! The catalog is seeded into `activity_fields` on first run. Picking a
//! sector during setup inserts its default services.

/// A catalog sector with the services offered out of the box.
#[derive(Debug, Clone, Copy)]
pub struct CatalogField {
    pub name: &'static str,
    pub default_services: &'static [&'static str],
}

pub const CATALOG: &[CatalogField] = &[
    CatalogField {
        name: "Pet Shop",
        default_services: &["Banho", "Tosa", "Tosa e Banho", "Hidratação", "Corte de Unhas"],
    },
    CatalogField {
        name: "Barbearia",
        default_services: &["Corte de Cabelo", "Barba", "Corte e Barba", "Sobrancelha", "Pigmentação"],
    },
    CatalogField {
        name: "Salão de Beleza",
        default_services: &["Corte Feminino", "Escova", "Coloração", "Manicure", "Pedicure"],
    },
    CatalogField {
        name: "Oficina Mecânica",
        default_services: &["Troca de Óleo", "Alinhamento", "Balanceamento", "Revisão", "Troca de Pastilhas"],
    },
    CatalogField {
        name: "Estética Automotiva",
        default_services: &["Lavagem Simples", "Lavagem Completa", "Polimento", "Higienização Interna"],
    },
    CatalogField {
        name: "Clínica Veterinária",
        default_services: &["Consulta", "Vacinação", "Vermifugação", "Exame de Rotina"],
    },
];

/// Look up a catalog entry by exact name.
pub fn find(name: &str) -> Option<&'static CatalogField> {
    CATALOG.iter().find(|f| f.name == name)
}

/// Default services for a sector, empty for sectors outside the catalog.
pub fn default_services(name: &str) -> &'static [&'static str] {
    find(name).map(|f| f.default_services).unwrap_or(&[])
}
