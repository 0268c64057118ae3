mod decoder_properties;
