// tests/invoice_flow.rs
//
// Fluxo completo de confirmação de fatura: validação, totais, baixa de
// estoque e congelamento de snapshots, contra um diretório de dados real.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use contalocal::AppState;
use contalocal::common::AppError;
use contalocal::models::{
    CompanySettingsPatch, CustomerInput, CustomerPatch, InvoiceDraft, LineRequest, ProductInput,
    ProductPatch,
};

fn state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::with_data_dir(dir.path()).unwrap();
    (dir, state)
}

fn add_customer(state: &mut AppState, name: &str) -> uuid::Uuid {
    state
        .customers
        .add(CustomerInput {
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            tax_number: None,
        })
        .unwrap()
        .id
}

fn add_product(state: &mut AppState, name: &str, price: Decimal, quantity: u32) -> uuid::Uuid {
    state
        .products
        .add(ProductInput {
            name: name.into(),
            description: None,
            price,
            quantity,
            category: None,
            sku: None,
            image_url: None,
        })
        .unwrap()
        .id
}

fn line(product_id: uuid::Uuid, quantity: u32, unit_price: Decimal) -> LineRequest {
    LineRequest {
        product_id: Some(product_id),
        quantity,
        unit_price,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
}

#[test]
fn confirmacao_feliz_baixa_o_estoque_e_congela_os_totais() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Notebook", dec!(100.00), 10);

    let mut draft = InvoiceDraft::new(customer, date());
    draft.items.push(line(product, 4, dec!(100.00)));

    let invoice = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap();

    assert_eq!(invoice.subtotal, dec!(400.00));
    assert_eq!(invoice.tax_amount, dec!(60.00));
    assert_eq!(invoice.total, dec!(460.00));
    assert_eq!(invoice.invoice_number, "INV-20240312-001");
    assert_eq!(state.products.get(product).unwrap().quantity, 6);
    assert_eq!(state.invoices.len(), 1);
}

#[test]
fn estoque_insuficiente_rejeita_sem_tocar_em_nada() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Mouse", dec!(50.00), 2);
    let invoices_before = state.invoices.len();

    let mut draft = InvoiceDraft::new(customer, date());
    draft.items.push(line(product, 5, dec!(50.00)));

    let err = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap_err();

    match err {
        AppError::InsufficientStock {
            name,
            requested,
            available,
        } => {
            assert_eq!(name, "Mouse");
            assert_eq!(requested, 5);
            assert_eq!(available, 2);
        }
        other => panic!("erro inesperado: {other}"),
    }
    assert_eq!(state.products.get(product).unwrap().quantity, 2);
    assert_eq!(state.invoices.len(), invoices_before);
}

#[test]
fn duas_linhas_com_desconto() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let a = add_product(&mut state, "Teclado", dec!(50.00), 10);
    let b = add_product(&mut state, "Cabo HDMI", dec!(20.00), 10);

    let mut draft = InvoiceDraft::new(customer, date());
    draft.discount_amount = dec!(10.00);
    draft.items.push(line(a, 2, dec!(50.00)));
    draft.items.push(line(b, 3, dec!(20.00)));

    let invoice = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap();

    assert_eq!(invoice.subtotal, dec!(160.00));
    assert_eq!(invoice.tax_amount, dec!(24.00));
    assert_eq!(invoice.discount_amount, dec!(10.00));
    assert_eq!(invoice.total, dec!(174.00));
    assert_eq!(state.products.get(a).unwrap().quantity, 8);
    assert_eq!(state.products.get(b).unwrap().quantity, 7);
}

#[test]
fn desconto_maior_que_o_valor_trava_o_total_em_zero() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Adaptador", dec!(100.00), 5);

    let mut draft = InvoiceDraft::new(customer, date());
    draft.discount_amount = dec!(200.00);
    draft.items.push(line(product, 1, dec!(100.00)));

    let invoice = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            Decimal::ZERO,
        )
        .unwrap();

    assert_eq!(invoice.subtotal, dec!(100.00));
    assert_eq!(invoice.total, Decimal::ZERO);
}

#[test]
fn fatura_sem_cliente_e_rejeitada_antes_de_qualquer_efeito() {
    let (_dir, mut state) = state();
    let product = add_product(&mut state, "Monitor", dec!(300.00), 3);
    let invoices_before = state.invoices.len();

    let draft = InvoiceDraft {
        customer_id: None,
        date: date(),
        due_date: None,
        discount_amount: Decimal::ZERO,
        notes: None,
        items: vec![line(product, 1, dec!(300.00))],
    };

    let err = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap_err();

    assert!(matches!(err, AppError::MissingCustomer));
    assert_eq!(state.products.get(product).unwrap().quantity, 3);
    assert_eq!(state.invoices.len(), invoices_before);
}

#[test]
fn carrinho_sem_linhas_validas_e_rejeitado() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");

    // Linha sem produto resolvido não conta como item válido.
    let mut draft = InvoiceDraft::new(customer, date());
    draft.items.push(LineRequest {
        product_id: None,
        quantity: 3,
        unit_price: dec!(10.00),
    });

    let err = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyCart));
}

#[test]
fn linhas_repetidas_do_mesmo_produto_contam_somadas() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Pendrive", dec!(25.00), 5);

    // Cada linha cabe no saldo sozinha; juntas estouram.
    let mut draft = InvoiceDraft::new(customer, date());
    draft.items.push(line(product, 3, dec!(25.00)));
    draft.items.push(line(product, 3, dec!(25.00)));

    let err = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientStock {
            requested: 6,
            available: 5,
            ..
        }
    ));
    assert_eq!(state.products.get(product).unwrap().quantity, 5);
}

#[test]
fn fatura_emitida_fica_imune_a_mudancas_posteriores() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Notebook", dec!(100.00), 10);

    let mut draft = InvoiceDraft::new(customer, date());
    draft.items.push(line(product, 4, dec!(100.00)));

    let invoice = state
        .engine
        .commit(
            &mut state.products,
            &mut state.invoices,
            &state.customers,
            draft,
            dec!(15),
        )
        .unwrap();
    let id = invoice.id;

    // Renomeia cliente e produto, muda o preço e a alíquota vigente.
    state.customers.update(
        customer,
        CustomerPatch {
            name: Some("Comercial Beta".into()),
            ..Default::default()
        },
    );
    state
        .products
        .update(
            product,
            ProductPatch {
                name: Some("Notebook Pro".into()),
                price: Some(dec!(999.00)),
                ..Default::default()
            },
        )
        .unwrap();
    state.settings.update_company(CompanySettingsPatch {
        tax_rate: Some(dec!(5)),
        ..Default::default()
    });

    let frozen = state.invoices.get(id).unwrap();
    assert_eq!(frozen.customer_name, "Comercial Alfa");
    assert_eq!(frozen.items[0].product_name, "Notebook");
    assert_eq!(frozen.items[0].unit_price, dec!(100.00));
    assert_eq!(frozen.tax_amount, dec!(60.00));
    assert_eq!(frozen.total, dec!(460.00));

    // A pré-visualização na alíquota de hoje reflete a mudança, sem persistir.
    let preview = state.engine.recompute_at_rate(frozen, state.settings.tax_rate());
    assert_eq!(preview.tax_amount, dec!(20.00));
    assert_eq!(preview.total, dec!(420.00));
    assert_eq!(state.invoices.get(id).unwrap().tax_amount, dec!(60.00));
}

#[test]
fn numeracao_sequencial_entre_faturas_do_mesmo_dia() {
    let (_dir, mut state) = state();
    let customer = add_customer(&mut state, "Comercial Alfa");
    let product = add_product(&mut state, "Caneta", dec!(2.00), 100);

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let mut draft = InvoiceDraft::new(customer, date());
        draft.items.push(line(product, 1, dec!(2.00)));
        let invoice = state
            .engine
            .commit(
                &mut state.products,
                &mut state.invoices,
                &state.customers,
                draft,
                dec!(15),
            )
            .unwrap();
        numbers.push(invoice.invoice_number);
    }

    assert_eq!(
        numbers,
        vec![
            "INV-20240312-001".to_string(),
            "INV-20240312-002".to_string(),
            "INV-20240312-003".to_string(),
        ]
    );
}

#[test]
fn estado_sobrevive_a_reabertura() {
    let dir = tempfile::tempdir().unwrap();
    let (invoice_id, product_id, expected_quantity) = {
        let mut state = AppState::with_data_dir(dir.path()).unwrap();
        let customer = add_customer(&mut state, "Comercial Alfa");
        let product = add_product(&mut state, "Notebook", dec!(100.00), 10);

        let mut draft = InvoiceDraft::new(customer, date());
        draft.items.push(line(product, 4, dec!(100.00)));
        let invoice = state
            .engine
            .commit(
                &mut state.products,
                &mut state.invoices,
                &state.customers,
                draft,
                dec!(15),
            )
            .unwrap();
        (invoice.id, product, 6u32)
    };

    let state = AppState::with_data_dir(dir.path()).unwrap();
    assert_eq!(state.invoices.get(invoice_id).unwrap().total, dec!(460.00));
    assert_eq!(
        state.products.get(product_id).unwrap().quantity,
        expected_quantity
    );
}
