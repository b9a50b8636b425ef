// src/store/seed.rs
//
// Dados iniciais usados quando não há nada gravado em disco (primeira
// execução) ou quando a coleção persistida está corrompida.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::models::expense::Expense;
use crate::models::invoice::Invoice;
use crate::models::product::Product;

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn products() -> Vec<Product> {
    let now = Utc::now();
    let product = |name: &str, description: &str, cents: i64, quantity: u32, sku: &str| Product {
        id: Uuid::new_v4(),
        name: name.into(),
        description: Some(description.into()),
        price: price(cents),
        quantity,
        category: Some("Eletrônicos".into()),
        sku: sku.into(),
        image_url: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        product(
            "Notebook Dell XPS 13",
            "Notebook de alto desempenho para profissionais",
            450_000,
            15,
            "DELL-XPS-13",
        ),
        product(
            "Impressora HP LaserJet",
            "Impressora a laser rápida e confiável",
            80_000,
            8,
            "HP-LJ-P1102",
        ),
        product(
            "Teclado mecânico",
            "Teclado mecânico para jogos",
            25_000,
            25,
            "KB-MECH-001",
        ),
        product(
            "Mouse sem fio",
            "Mouse sem fio confortável para o dia a dia",
            12_000,
            30,
            "MOUSE-WL-001",
        ),
    ]
}

pub fn customers() -> Vec<Customer> {
    let now = Utc::now();
    let customer = |name: &str, email: &str, phone: &str, address: &str, tax: &str| Customer {
        id: Uuid::new_v4(),
        name: name.into(),
        email: Some(email.into()),
        phone: Some(phone.into()),
        address: Some(address.into()),
        tax_number: Some(tax.into()),
        created_at: now,
        updated_at: now,
    };

    vec![
        customer(
            "Comercial Esperança Ltda",
            "contato@esperanca.com",
            "+966501234567",
            "Riade, bairro Rei Fahd",
            "123456789",
        ),
        customer(
            "Instituto Sucesso",
            "contato@sucesso.com",
            "+966507654321",
            "Jeddah, bairro Rawdah",
            "987654321",
        ),
        customer(
            "Progresso Consultoria",
            "ola@progresso.com",
            "+966512345678",
            "Dammam, bairro Faisaliyah",
            "456789123",
        ),
    ]
}

// Faturas e despesas começam vazias: seeds com referências cruzadas entre
// coleções gravadas em arquivos separados não sobrevivem a uma recuperação
// parcial de corrupção.
pub fn invoices() -> Vec<Invoice> {
    Vec::new()
}

pub fn expenses() -> Vec<Expense> {
    Vec::new()
}
